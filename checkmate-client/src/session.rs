//! Local session store
//!
//! Persists the logged-in identity plus the two transient scan artifacts
//! (in-progress image URI, parsed-draft blob) as a JSON file. The session
//! is written only at login/logout boundaries and injected explicitly into
//! whatever needs it; nothing reads it ambiently.

use serde::{Deserialize, Serialize};
use shared::client::LoginResponse;
use shared::split::ReceiptDraft;
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub token: Option<String>,
    pub is_logged_in: bool,
    /// Image URI of a scan that was interrupted mid-flow
    #[serde(default)]
    pub pending_scan_uri: Option<String>,
    /// Parsed-receipt draft awaiting review; cleared on consumption
    #[serde(default)]
    draft_json: Option<String>,
}

impl Session {
    pub fn new(
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_email: user_email.into(),
            token: None,
            is_logged_in: true,
            pending_scan_uri: None,
            draft_json: None,
        }
    }

    /// Build a session from a successful login response; None when the
    /// response is missing identity fields
    pub fn from_login(response: &LoginResponse) -> Option<Self> {
        if !response.success {
            return None;
        }
        let mut session = Self::new(
            response.user_id.clone()?,
            response.name.clone().unwrap_or_default(),
            response.email.clone().unwrap_or_default(),
        );
        session.token = response.token.clone();
        Some(session)
    }

    /// Stash a parsed draft for the review screen to pick up
    pub fn stash_draft(&mut self, draft: &ReceiptDraft) -> serde_json::Result<()> {
        self.draft_json = Some(serde_json::to_string(draft)?);
        Ok(())
    }

    /// Consume the stashed draft, clearing it so it is never applied twice
    pub fn take_draft(&mut self) -> Option<ReceiptDraft> {
        let json = self.draft_json.take()?;
        match serde_json::from_str(&json) {
            Ok(draft) => Some(draft),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable stashed draft");
                None
            }
        }
    }

    pub fn has_stashed_draft(&self) -> bool {
        self.draft_json.is_some()
    }

    /// Clear identity at logout; transient scan state goes with it
    pub fn logout(&mut self) {
        self.token = None;
        self.is_logged_in = false;
        self.pending_scan_uri = None;
        self.draft_json = None;
    }
}

/// JSON-file persistence for [`Session`]
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Create a session store rooted at `base_path`
    pub fn new(base_path: impl Into<PathBuf>, filename: &str) -> Self {
        let path = base_path.into().join(filename);
        Self { path }
    }

    /// Ensure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save the session
    pub fn save(&self, session: &Session) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
    }

    /// Load the session, if one is stored and readable
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    /// Check if a session file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the session file
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Get the path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ReceiptDraft {
        let raw: shared::split::RawReceipt = serde_json::from_str(
            r#"{"merchant": "Mario's", "total": 12.0,
                "items": [{"itemId": "t", "name": "Taco", "price": 5.0, "qty": 2}]}"#,
        )
        .unwrap();
        ReceiptDraft::from_raw(&raw)
    }

    #[test]
    fn test_from_login() {
        let resp = LoginResponse {
            success: true,
            message: None,
            user_id: Some("7".into()),
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            token: Some("tok".into()),
        };
        let session = Session::from_login(&resp).unwrap();
        assert!(session.is_logged_in);
        assert_eq!(session.user_id, "7");
        assert_eq!(session.token.as_deref(), Some("tok"));

        let failed = LoginResponse {
            success: false,
            ..resp
        };
        assert!(Session::from_login(&failed).is_none());
    }

    #[test]
    fn test_draft_is_cleared_on_consumption() {
        let mut session = Session::new("7", "Ada", "ada@example.com");
        session.stash_draft(&draft()).unwrap();
        assert!(session.has_stashed_draft());

        let restored = session.take_draft().unwrap();
        assert_eq!(restored.merchant_name, "Mario's");
        assert_eq!(restored.units.len(), 2);

        assert!(!session.has_stashed_draft());
        assert!(session.take_draft().is_none());
    }

    #[test]
    fn test_storage_round_trip() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let storage = SessionStorage::new(temp_dir.path(), "session.json");

        let mut session = Session::new("7", "Ada", "ada@example.com");
        session.token = Some("tok".into());
        session.stash_draft(&draft()).unwrap();

        storage.save(&session).unwrap();
        assert!(storage.exists());

        let mut loaded = storage.load().unwrap();
        assert_eq!(loaded.user_id, "7");
        assert_eq!(loaded.token.as_deref(), Some("tok"));
        assert!(loaded.take_draft().is_some());

        storage.delete().unwrap();
        assert!(!storage.exists());
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_logout_clears_transients() {
        let mut session = Session::new("7", "Ada", "ada@example.com");
        session.token = Some("tok".into());
        session.pending_scan_uri = Some("file:///scan.jpg".into());
        session.stash_draft(&draft()).unwrap();

        session.logout();
        assert!(!session.is_logged_in);
        assert!(session.token.is_none());
        assert!(session.pending_scan_uri.is_none());
        assert!(!session.has_stashed_draft());
    }
}
