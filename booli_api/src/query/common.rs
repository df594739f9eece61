//! The [`Query`] trait shared by everything that renders into a request URL.

use url::Url;

/// Trait implemented by all query builders.
pub trait Query {
    /// Ordered `(name, value)` pairs to send. Unset optional fields are omitted.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in self.query_pairs() {
                pairs.append_pair(name, &value);
            }
        }
        url
    }
}
