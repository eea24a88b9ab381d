//! List query parameters
//!
//! Builders for the `page` / `limit` / `search` / filter query strings of
//! the admin list endpoints. Optional parameters are only emitted when they
//! differ from their default (empty search, `all` filter).

use std::fmt;
use std::str::FromStr;

use crate::models::{AffiliateTier, PaymentStatus, PlanTier};

/// A discrete list filter; `All` means "not filtered"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter<T> {
    #[default]
    All,
    Only(T),
}

impl<T> Filter<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Filter::All => None,
            Filter::Only(v) => Some(v),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Filter::All)
    }
}

impl<T: FromStr> FromStr for Filter<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            return Ok(Filter::All);
        }
        s.parse().map(Filter::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str("all"),
            Filter::Only(v) => v.fmt(f),
        }
    }
}

/// Query parameters as `(key, value)` pairs, in emission order
pub type QueryParams = Vec<(&'static str, String)>;

/// `GET /admin/users` parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub plan: Filter<PlanTier>,
    pub affiliate_tier: Filter<AffiliateTier>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            plan: Filter::All,
            affiliate_tier: Filter::All,
        }
    }
}

impl UserQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = vec![("page", self.page.to_string()), ("limit", self.limit.to_string())];
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if let Some(plan) = self.plan.value() {
            params.push(("plan", plan.as_str().to_string()));
        }
        if let Some(tier) = self.affiliate_tier.value() {
            params.push(("affiliateTier", tier.as_str().to_string()));
        }
        params
    }
}

/// `GET /admin/transactions` parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionQuery {
    pub page: u32,
    pub limit: Option<u32>,
    pub search: String,
    pub status: Filter<PaymentStatus>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            search: String::new(),
            status: Filter::All,
        }
    }
}

impl TransactionQuery {
    pub fn to_params(&self) -> QueryParams {
        let mut params = vec![("page", self.page.to_string())];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if let Some(status) = self.status.value() {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_user_query_only_paginates() {
        let params = UserQuery::default().to_params();
        assert_eq!(
            params,
            vec![("page", "1".to_string()), ("limit", "10".to_string())]
        );
    }

    #[test]
    fn test_user_query_with_filters() {
        let query = UserQuery {
            page: 3,
            search: "  john ".into(),
            plan: Filter::Only(PlanTier::Pro),
            affiliate_tier: Filter::Only(AffiliateTier::Tier1),
            ..Default::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("search", "john".to_string())));
        assert!(params.contains(&("plan", "pro".to_string())));
        assert!(params.contains(&("affiliateTier", "tier1".to_string())));
        assert_eq!(params[0], ("page", "3".to_string()));
    }

    #[test]
    fn test_transaction_status_all_is_omitted() {
        let query = TransactionQuery {
            status: "all".parse().unwrap(),
            ..Default::default()
        };
        assert_eq!(query.to_params(), vec![("page", "1".to_string())]);

        let query = TransactionQuery {
            status: "completed".parse().unwrap(),
            ..Default::default()
        };
        assert!(query.to_params().contains(&("status", "completed".to_string())));
    }
}
