use crate::config::Config;

/// Settings the page renderers need, handed to them explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Site {
    pub base_url: String,
    pub analytics_id: Option<String>,
}

impl Site {
    pub fn from_config(config: &Config) -> Site {
        Site {
            base_url: config.site.base_url.clone(),
            analytics_id: config.site.analytics_id.clone(),
        }
    }

    /// Prefixes an absolute asset path with the base url, when there is one.
    pub fn asset_path(&self, path: &str) -> String {
        if self.base_url.is_empty() {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn post_url(&self, slug: &str) -> String {
        self.asset_path(&format!("/posts/{}", slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_path_without_base_url() {
        let site = Site::default();
        assert_eq!(site.asset_path("/favicon.ico"), "/favicon.ico");
        assert_eq!(site.post_url("2024-01-15-hello"), "/posts/2024-01-15-hello");
    }

    #[test]
    fn test_asset_path_with_base_url() {
        let site = Site { base_url: "https://example.github.io/blog/".to_string(), analytics_id: None };
        assert_eq!(site.asset_path("/favicon.ico"), "https://example.github.io/blog/favicon.ico");
        assert_eq!(site.asset_path("img/a.png"), "https://example.github.io/blog/img/a.png");
        assert_eq!(site.post_url("hello"), "https://example.github.io/blog/posts/hello");
    }

    #[test]
    fn test_from_config() {
        let config = crate::config::parse_config("[site]\nbase_url = \"/blog\"\nanalytics_id = \"G-1\"\n").unwrap();
        let site = Site::from_config(&config);
        assert_eq!(site, Site { base_url: "/blog".to_string(), analytics_id: Some("G-1".to_string()) });
    }
}
