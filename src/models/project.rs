pub const HEADER_PROJECT: &str = "x-appwrite-project";
pub const HEADER_KEY: &str = "x-appwrite-key";

/// Which side of the API the calls impersonate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Side {
    /// Browser-like caller authenticated by a session cookie
    Client { session: String, origin: String },
    /// Backend caller authenticated by the project API key
    Server,
}

/// Project the suite runs against plus the credentials it uses
#[derive(Debug, Clone)]
pub struct ProjectScope {
    pub project_id: String,
    pub api_key: String,
    pub side: Side,
}

impl ProjectScope {
    pub fn new(project_id: impl Into<String>, api_key: impl Into<String>, side: Side) -> Self {
        Self {
            project_id: project_id.into(),
            api_key: api_key.into(),
            side,
        }
    }

    /// Headers for calls made on behalf of the configured side
    pub fn side_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(HEADER_PROJECT.to_string(), self.project_id.clone())];
        match &self.side {
            Side::Client { session, origin } => {
                headers.push(("origin".to_string(), origin.clone()));
                headers.push((
                    "cookie".to_string(),
                    format!("a_session_{}={}", self.project_id, session),
                ));
            }
            Side::Server => {
                headers.push((HEADER_KEY.to_string(), self.api_key.clone()));
            }
        }
        headers
    }

    /// Headers for administrative calls, always keyed
    pub fn key_headers(&self) -> Vec<(String, String)> {
        vec![
            (HEADER_PROJECT.to_string(), self.project_id.clone()),
            (HEADER_KEY.to_string(), self.api_key.clone()),
        ]
    }
}
