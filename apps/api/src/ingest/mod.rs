// Listings ingestion: the external job feed (Adzuna), the admission filter
// shared with the recency scorer's freshness window, and the fetch-and-match
// endpoint.

pub mod fetcher;
pub mod handlers;
