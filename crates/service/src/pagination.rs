//! Paging and sorting options for list queries.
//!
//! Sort keys use the `property(,asc|desc)` text form; several properties may
//! share one direction (`name,id,desc`). Keys apply in the order given.

use std::str::FromStr;

use crate::errors::ServiceError;

pub const DEFAULT_PAGE: u64 = 0;
pub const DEFAULT_PAGE_SIZE: u64 = 3;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ServiceError::Validation(format!("unknown sort direction '{other}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub property: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(property: &str) -> Self { Self { property: property.to_string(), direction: SortDirection::Asc } }
    pub fn desc(property: &str) -> Self { Self { property: property.to_string(), direction: SortDirection::Desc } }

    /// Parse one `sort` parameter, which may name several properties.
    pub fn parse_param(raw: &str) -> Result<Vec<SortKey>, ServiceError> {
        let mut parts: Vec<&str> = raw.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
        let direction = match parts.last().map(|p| p.parse::<SortDirection>()) {
            Some(Ok(d)) => {
                parts.pop();
                d
            }
            _ => SortDirection::Asc,
        };
        if parts.is_empty() {
            return Err(ServiceError::Validation(format!("sort '{raw}' names no property")));
        }
        Ok(parts
            .into_iter()
            .map(|p| SortKey { property: p.to_string(), direction })
            .collect())
    }
}

/// A validated request for one window of a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// items per page, `1..=MAX_PAGE_SIZE`
    pub size: u64,
    pub sort: Vec<SortKey>,
}

impl PageRequest {
    pub fn new(page: u64, size: u64, sort: Vec<SortKey>) -> Result<Self, ServiceError> {
        if size == 0 || size > MAX_PAGE_SIZE {
            return Err(ServiceError::Validation(format!("page size must be within 1..={MAX_PAGE_SIZE}, got {size}")));
        }
        // the row offset is bound as a signed 64-bit value
        match page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => {}
            _ => return Err(ServiceError::Validation(format!("page {page} is out of range for size {size}"))),
        }
        Ok(Self { page, size, sort })
    }

    /// Build from raw query parameters, filling the documented defaults.
    pub fn from_params(page: Option<u64>, size: Option<u64>, sort: &[String]) -> Result<Self, ServiceError> {
        let mut keys = Vec::new();
        for raw in sort {
            keys.extend(SortKey::parse_param(raw)?);
        }
        Self::new(page.unwrap_or(DEFAULT_PAGE), size.unwrap_or(DEFAULT_PAGE_SIZE), keys)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page: DEFAULT_PAGE, size: DEFAULT_PAGE_SIZE, sort: Vec::new() } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let p = PageRequest::from_params(None, None, &[]).unwrap();
        assert_eq!(p, PageRequest { page: 0, size: 3, sort: vec![] });
        assert_eq!(PageRequest::default(), p);
    }

    #[test]
    fn rejects_zero_and_oversized_pages() {
        assert!(matches!(PageRequest::new(0, 0, vec![]), Err(ServiceError::Validation(_))));
        assert!(PageRequest::new(0, MAX_PAGE_SIZE + 1, vec![]).is_err());
        assert!(PageRequest::new(7, MAX_PAGE_SIZE, vec![]).is_ok());
    }

    #[test]
    fn rejects_pages_whose_offset_overflows() {
        assert!(matches!(PageRequest::new(u64::MAX, 3, vec![]), Err(ServiceError::Validation(_))));
        assert!(PageRequest::new(1 << 62, 3, vec![]).is_err());
        assert!(PageRequest::from_params(Some(4_611_686_018_427_387_904), None, &[]).is_err());
        let last = i64::MAX as u64 / MAX_PAGE_SIZE;
        assert!(PageRequest::new(last, MAX_PAGE_SIZE, vec![]).is_ok());
        assert!(PageRequest::new(last + 1, MAX_PAGE_SIZE, vec![]).is_err());
    }

    #[test]
    fn sort_keys_keep_listed_order() {
        let p = PageRequest::from_params(Some(1), Some(5), &["name,desc".into(), "id".into()]).unwrap();
        assert_eq!(p.sort, vec![SortKey::desc("name"), SortKey::asc("id")]);
    }

    #[test]
    fn direction_applies_to_every_property_in_param() {
        let keys = SortKey::parse_param("name, created_at ,DESC").unwrap();
        assert_eq!(keys, vec![SortKey::desc("name"), SortKey::desc("created_at")]);
    }

    #[test]
    fn bare_direction_is_rejected() {
        assert!(SortKey::parse_param("desc").is_err());
        assert!(SortKey::parse_param(",").is_err());
    }
}
