//! Resume parser — extracts raw text, skills, and experience signals from an
//! uploaded document.
//!
//! PDF and TXT are handled in-process; DOCX goes through a `pandoc --to=plain`
//! subprocess (office-convert strategy), so pandoc must be on the PATH of any
//! deployment that accepts DOCX uploads.

use std::collections::BTreeSet;
use std::io::Write;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

/// Supported upload types. Anything else is rejected before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl FileType {
    pub fn from_filename(name: &str) -> Option<Self> {
        let extension = name.rsplit_once('.')?.1.to_lowercase();
        match extension.as_str() {
            "pdf" => Some(FileType::Pdf),
            "docx" => Some(FileType::Docx),
            "txt" => Some(FileType::Txt),
            _ => None,
        }
    }
}

/// Seniority derived from years of experience: <2 → Junior, 2–5 → Mid,
/// >5 → Senior. Provided for completeness; scoring does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

/// The parsed-resume record handed to storage and matching.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedResume {
    pub text: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub seniority: Seniority,
}

/// Skill vocabulary matched against resume text. Multi-word entries are
/// matched as substrings, single words as whole tokens.
const SKILL_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "javascript",
    "sql",
    "machine learning",
    "data analysis",
    "fastapi",
    "django",
    "react",
    "aws",
    "docker",
    "git",
];

pub async fn parse_resume(bytes: &[u8], file_type: FileType) -> Result<ParsedResume, AppError> {
    let text = extract_text(bytes, file_type).await?;
    let skills = extract_skills(&text);
    let experience_years = extract_experience_years(&text);
    let seniority = infer_seniority(experience_years);

    debug!(
        "Parsed resume: {} chars, {} skills, {experience_years} years",
        text.len(),
        skills.len()
    );

    Ok(ParsedResume {
        text,
        skills,
        experience_years,
        seniority,
    })
}

/// Extracts raw text from the uploaded document.
pub async fn extract_text(bytes: &[u8], file_type: FileType) -> Result<String, AppError> {
    match file_type {
        FileType::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::UnsupportedInput(format!("could not extract PDF text: {e}"))),
        FileType::Txt => Ok(String::from_utf8_lossy(bytes).into_owned()),
        FileType::Docx => docx_text(bytes).await,
    }
}

/// Converts a DOCX to plain text by handing a tempfile to pandoc.
async fn docx_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut file = tempfile::Builder::new()
        .suffix(".docx")
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("tempfile creation failed: {e}")))?;
    file.write_all(bytes)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("tempfile write failed: {e}")))?;

    let output = tokio::process::Command::new("pandoc")
        .arg(file.path())
        .arg("--to=plain")
        .output()
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("failed to run pandoc: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::UnsupportedInput(format!(
            "could not extract DOCX text: {stderr}"
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Matches the skill vocabulary against the text. Returned skills are
/// lowercase and deduplicated, in vocabulary order.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let tokens: BTreeSet<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    SKILL_KEYWORDS
        .iter()
        .filter(|keyword| {
            if keyword.contains(' ') {
                lowered.contains(*keyword)
            } else {
                tokens.contains(*keyword)
            }
        })
        .map(|keyword| keyword.to_string())
        .collect()
}

fn experience_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)(\d+)\s*years?\s*of\s*experience",
            r"(?i)experience\s*of\s*(\d+)\s*years?",
            r"(?i)(\d+)\s*years?\s*in\s",
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static experience regex"))
        .collect()
    })
}

/// Largest years-of-experience figure mentioned in the text; 0 when none.
pub fn extract_experience_years(text: &str) -> u32 {
    experience_patterns()
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|captures| captures.get(1)?.as_str().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

pub fn infer_seniority(years: u32) -> Seniority {
    if years < 2 {
        Seniority::Junior
    } else if years <= 5 {
        Seniority::Mid
    } else {
        Seniority::Senior
    }
}
