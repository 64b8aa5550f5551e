// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Query-string parsing for the listing endpoints.
//!
//! Unknown parameters are ignored; malformed values for known parameters are
//! a validation error, never a silent default.

use std::collections::HashMap;

use crate::errors::ApiError;
use crate::models::{ModuleCategory, PromptVisibility, UserRole};
use crate::repositories::{ModuleFilter, ModuleSort, Page, PromptFilter, PromptSort};

pub fn parse(query: Option<&str>) -> Result<HashMap<String, String>, ApiError> {
    let mut params = HashMap::new();
    let Some(query) = query else {
        return Ok(params);
    };
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params.insert(decode(key)?, decode(value)?);
    }
    Ok(params)
}

fn decode(raw: &str) -> Result<String, ApiError> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|cow| cow.into_owned())
        .map_err(|_| ApiError::Validation(format!("Malformed query parameter: '{raw}'")))
}

pub fn page(params: &HashMap<String, String>) -> Result<Page, ApiError> {
    Ok(Page {
        page: positive(params, "page")?,
        page_size: positive(params, "pageSize")?,
    })
}

fn positive(params: &HashMap<String, String>, key: &str) -> Result<Option<usize>, ApiError> {
    match params.get(key) {
        None => Ok(None),
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => Err(ApiError::Validation(format!("{key} must be a positive integer"))),
        },
    }
}

pub fn module_query(params: &HashMap<String, String>) -> Result<(ModuleFilter, ModuleSort), ApiError> {
    let filter = ModuleFilter {
        category: params.get("category").map(|v| category(v)).transpose()?,
        enabled: params.get("enabled").map(|v| boolean("enabled", v)).transpose()?,
        visibility: params.get("visibility").map(|v| role(v)).transpose()?,
        search: non_empty(params.get("search")),
        tags: tags(params.get("tags")),
    };
    let sort = match params.get("sort").map(String::as_str) {
        None => ModuleSort::default(),
        Some("recent") => ModuleSort::Recent,
        Some("popular") => ModuleSort::Popular,
        Some("rating") => ModuleSort::Rating,
        Some(other) => {
            return Err(ApiError::Validation(format!("Unknown sort: '{other}'")));
        }
    };
    Ok((filter, sort))
}

pub fn prompt_query(params: &HashMap<String, String>) -> Result<(PromptFilter, PromptSort), ApiError> {
    let filter = PromptFilter {
        category: non_empty(params.get("category")),
        visibility: params.get("visibility").map(|v| prompt_visibility(v)).transpose()?,
        access_level: params.get("accessLevel").map(|v| role(v)).transpose()?,
        search: non_empty(params.get("search")),
        tags: tags(params.get("tags")),
    };
    let sort = match params.get("sort").map(String::as_str) {
        None => PromptSort::default(),
        Some("recent") => PromptSort::Recent,
        Some("popular") => PromptSort::Popular,
        Some("success") => PromptSort::Success,
        Some(other) => {
            return Err(ApiError::Validation(format!("Unknown sort: '{other}'")));
        }
    };
    Ok((filter, sort))
}

fn category(raw: &str) -> Result<ModuleCategory, ApiError> {
    match raw {
        "repair" => Ok(ModuleCategory::Repair),
        "enhancement" => Ok(ModuleCategory::Enhancement),
        "style" => Ok(ModuleCategory::Style),
        "creative" => Ok(ModuleCategory::Creative),
        other => Err(ApiError::Validation(format!("Unknown category: '{other}'"))),
    }
}

fn prompt_visibility(raw: &str) -> Result<PromptVisibility, ApiError> {
    match raw {
        "public" => Ok(PromptVisibility::Public),
        "private" => Ok(PromptVisibility::Private),
        "system" => Ok(PromptVisibility::System),
        other => Err(ApiError::Validation(format!("Unknown visibility: '{other}'"))),
    }
}

fn role(raw: &str) -> Result<UserRole, ApiError> {
    raw.parse::<UserRole>().map_err(ApiError::Validation)
}

fn boolean(key: &str, raw: &str) -> Result<bool, ApiError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ApiError::Validation(format!("{key} must be true or false"))),
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

fn tags(value: Option<&String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> HashMap<String, String> {
        parse(Some(query)).unwrap()
    }

    #[test]
    fn parse_decodes_percent_escapes_and_plus() {
        let params = params("search=neo%20noir+style&page=2");
        assert_eq!(params["search"], "neo noir style");
        assert_eq!(params["page"], "2");
        assert!(parse(None).unwrap().is_empty());
    }

    #[test]
    fn module_query_builds_filter_and_sort() {
        let params = params("category=style&enabled=true&visibility=editor&tags=noir,%20neon&sort=rating");
        let (filter, sort) = module_query(&params).unwrap();
        assert_eq!(filter.category, Some(ModuleCategory::Style));
        assert_eq!(filter.enabled, Some(true));
        assert_eq!(filter.visibility, Some(UserRole::Editor));
        assert_eq!(filter.tags, vec!["noir".to_string(), "neon".to_string()]);
        assert_eq!(sort, ModuleSort::Rating);
    }

    #[test]
    fn bad_values_are_validation_errors() {
        assert!(matches!(
            module_query(&params("category=cooking")),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            module_query(&params("sort=alphabetical")),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(page(&params("page=0")), Err(ApiError::Validation(_))));
        assert!(matches!(page(&params("pageSize=lots")), Err(ApiError::Validation(_))));
    }

    #[test]
    fn prompt_query_accepts_the_prompt_specific_axes() {
        let params = params("visibility=system&accessLevel=admin&sort=success&category=style");
        let (filter, sort) = prompt_query(&params).unwrap();
        assert_eq!(filter.visibility, Some(PromptVisibility::System));
        assert_eq!(filter.access_level, Some(UserRole::Admin));
        assert_eq!(filter.category.as_deref(), Some("style"));
        assert_eq!(sort, PromptSort::Success);
    }
}
