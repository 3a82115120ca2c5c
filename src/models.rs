use crate::config::Config;
use crate::search::ArxivClient;
use crate::types::{AppError, AppResult};

/// Default number of results requested from arXiv when `limit` is omitted.
pub const DEFAULT_LIMIT: u32 = 15;
/// Default pagination offset when `start` is omitted.
pub const DEFAULT_START: u32 = 0;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub arxiv: ArxivClient,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let arxiv = ArxivClient::from_config(&config.upstream)?;
        Ok(Self { config, arxiv })
    }
}

/// A list parameter as it arrives on the wire: either a bare value or a
/// sequence built from repeated / bracketed keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordParam {
    Single(String),
    Multiple(Vec<String>),
}

impl KeywordParam {
    /// Normalize to the canonical ordered sequence.
    pub fn into_terms(self) -> Vec<String> {
        match self {
            KeywordParam::Single(term) => vec![term],
            KeywordParam::Multiple(terms) => terms,
        }
    }

    /// Collect every occurrence of `name` from decoded query pairs.
    ///
    /// Accepts `name=v` (repeatable), `name[]=v` and `name[<index>]=v`.
    /// Indexed entries are ordered by index; everything else keeps its order
    /// of appearance. A bracket key that is not an index (`name[foo]=v`)
    /// describes an object, which is rejected.
    pub fn from_pairs(pairs: &[(String, String)], name: &str) -> AppResult<Option<Self>> {
        let mut entries: Vec<(Option<usize>, String)> = Vec::new();
        let mut bare_only = true;

        for (key, value) in pairs {
            if key == name {
                entries.push((None, value.clone()));
                continue;
            }

            let Some(inner) = key
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('['))
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                continue;
            };

            bare_only = false;
            if inner.is_empty() {
                entries.push((None, value.clone()));
            } else {
                let index = inner.parse::<usize>().map_err(|_| {
                    AppError::InvalidRequest(format!(
                        "{} must be a string or an array of strings",
                        name
                    ))
                })?;
                entries.push((Some(index), value.clone()));
            }
        }

        if entries.is_empty() {
            return Ok(None);
        }

        if bare_only && entries.len() == 1 {
            let (_, value) = entries.remove(0);
            return Ok(Some(KeywordParam::Single(value)));
        }

        entries.sort_by_key(|(index, _)| index.unwrap_or(usize::MAX));
        Ok(Some(KeywordParam::Multiple(
            entries.into_iter().map(|(_, value)| value).collect(),
        )))
    }
}

/// Validated parameters of a `/search/` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub keywords: Vec<String>,
    pub negatives: Vec<String>,
    pub limit: u32,
    pub start: u32,
}

impl SearchRequest {
    pub fn from_pairs(pairs: &[(String, String)]) -> AppResult<Self> {
        let keywords = KeywordParam::from_pairs(pairs, "keywords")?
            .ok_or_else(|| AppError::InvalidRequest("keywords parameter is required".to_string()))?
            .into_terms();

        if keywords.is_empty() || keywords.iter().any(|k| k.is_empty()) {
            return Err(AppError::InvalidRequest(
                "keywords must be a non-empty string or array of non-empty strings".to_string(),
            ));
        }

        // An empty negative is the same as none; it must not open a NOT group.
        let negatives = KeywordParam::from_pairs(pairs, "negatives")?
            .map(KeywordParam::into_terms)
            .unwrap_or_default()
            .into_iter()
            .filter(|term| !term.is_empty())
            .collect();

        Ok(Self {
            keywords,
            negatives,
            limit: scalar(pairs, "limit")?.unwrap_or(DEFAULT_LIMIT),
            start: scalar(pairs, "start")?.unwrap_or(DEFAULT_START),
        })
    }
}

/// First occurrence of an unsigned integer parameter.
fn scalar(pairs: &[(String, String)], name: &str) -> AppResult<Option<u32>> {
    pairs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| {
            value.trim().parse::<u32>().map_err(|_| {
                AppError::InvalidRequest(format!("{} must be a non-negative integer", name))
            })
        })
        .transpose()
}

/// Raw parameters of a `/freesearch/` request. Nothing beyond presence is checked.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct FreeSearchParams {
    pub keywords: Option<String>,
    pub limit: Option<String>,
    pub negative: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub upstream: String,
}
