use crate::auth::{Credentials, Signature};

use super::common::Query;

/// Search parameters for the `/sold` endpoint.
///
/// Dates are passed through literally and are expected as `YYYYMMDD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoldQuery {
    /// Free-text search (area, municipality, address).
    pub q: String,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub min_sold_date: Option<String>,
    pub max_sold_date: Option<String>,
}

impl SoldQuery {
    pub fn new(q: &str) -> Self {
        Self {
            q: q.to_string(),
            ..Default::default()
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_min_sold_date(mut self, date: &str) -> Self {
        self.min_sold_date = Some(date.to_string());
        self
    }

    pub fn with_max_sold_date(mut self, date: &str) -> Self {
        self.max_sold_date = Some(date.to_string());
        self
    }

    /// Signs this query with fresh credentials-derived parameters.
    pub fn sign(&self, credentials: &Credentials) -> SignedQuery<'_> {
        SignedQuery {
            signature: credentials.sign(),
            query: self,
        }
    }
}

impl Query for SoldQuery {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("q", self.q.clone())];
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(date) = &self.min_sold_date {
            pairs.push(("minSoldDate", date.clone()));
        }
        if let Some(date) = &self.max_sold_date {
            pairs.push(("maxSoldDate", date.clone()));
        }
        pairs
    }
}

/// A [`SoldQuery`] bundled with the signature for exactly one request.
#[derive(Debug, Clone)]
pub struct SignedQuery<'a> {
    pub signature: Signature,
    pub query: &'a SoldQuery,
}

impl<'a> SignedQuery<'a> {
    pub fn new(signature: Signature, query: &'a SoldQuery) -> Self {
        Self { signature, query }
    }
}

impl Query for SignedQuery<'_> {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> = self.signature.query_pairs().into();
        pairs.extend(self.query.query_pairs());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn fixed_signed(query: &SoldQuery) -> SignedQuery<'_> {
        let signature =
            Credentials::new("secret-key", "my-app").sign_with(1_700_000_000, "ABCDEFGHIJ012345");
        SignedQuery::new(signature, query)
    }

    #[test]
    fn sold_query_minimal() {
        let base = Url::parse("https://api.booli.se/sold").unwrap();
        let url = SoldQuery::new("uddevalla").add_to_url(&base);
        insta::assert_snapshot!(url.to_string(), @"https://api.booli.se/sold?q=uddevalla");
    }

    #[test]
    fn signed_query_full() {
        let query = SoldQuery::new("göteborg")
            .with_limit(100)
            .with_offset(200)
            .with_min_sold_date("20230101")
            .with_max_sold_date("20230201");
        let base = Url::parse("https://api.booli.se/sold").unwrap();
        let url = fixed_signed(&query).add_to_url(&base);
        insta::assert_snapshot!(
            url.to_string(),
            @"https://api.booli.se/sold?callerId=my-app&time=1700000000&unique=ABCDEFGHIJ012345&hash=d7da2ed2ea6ab566c57bc1ebc90ac8df104061f6&q=g%C3%B6teborg&limit=100&offset=200&minSoldDate=20230101&maxSoldDate=20230201"
        );
    }

    #[test]
    fn unset_fields_are_omitted() {
        let query = SoldQuery::new("sverige");
        let names: Vec<&str> = fixed_signed(&query)
            .query_pairs()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(names, vec!["callerId", "time", "unique", "hash", "q"]);
    }

    #[test]
    fn sign_uses_fresh_signature() {
        let creds = Credentials::new("k", "c");
        let query = SoldQuery::new("x");
        let a = query.sign(&creds);
        let b = query.sign(&creds);
        assert_ne!(a.signature.unique, b.signature.unique);
    }
}
