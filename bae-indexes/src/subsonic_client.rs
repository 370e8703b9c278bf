use crate::error::{IndexesError, TransportError};
use crate::parser::IndexesParser;
use crate::preferences::PreferencesStore;
use crate::progress::ProgressSink;
use bae_common::IndexesUpdate;
use tracing::debug;

const API_VERSION: &str = "1.16.1";
const CLIENT_NAME: &str = "bae";

/// Fetches artist indexes from a Subsonic-compatible server (Navidrome,
/// Airsonic, other bae instances).
///
/// Responses are requested as XML and fed through an [`IndexesParser`].
pub struct SubsonicClient {
    server_url: String,
    username: String,
    password: String,
    http: reqwest::Client,
}

impl SubsonicClient {
    pub fn new(server_url: String, username: String, password: String) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            username,
            password,
            http: reqwest::Client::new(),
        }
    }

    /// Build a full URL with Subsonic auth query params (token-salt method).
    fn build_url(&self, endpoint: &str, extra_params: &[(&str, &str)]) -> String {
        let salt = generate_salt();
        let token = md5_hex(&format!("{}{}", self.password, salt));

        let mut url = format!("{}{}", self.server_url, endpoint);
        url.push_str(&format!(
            "?u={}&t={}&s={}&v={}&c={}&f=xml",
            urlencoding::encode(&self.username),
            token,
            salt,
            API_VERSION,
            CLIENT_NAME,
        ));

        for (key, value) in extra_params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }

        url
    }

    /// Download a response body. Non-2xx statuses are transport errors.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let resp = self.http.get(url).send().await?.error_for_status()?;
        Ok(resp.bytes().await?.to_vec())
    }

    fn indexes_url(&self, music_folder_id: Option<&str>, if_modified_since: Option<u64>) -> String {
        let since = if_modified_since.map(|t| t.to_string());
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(id) = music_folder_id {
            params.push(("musicFolderId", id));
        }
        if let Some(since) = since.as_deref() {
            params.push(("ifModifiedSince", since));
        }
        self.build_url("/rest/getIndexes", &params)
    }

    fn artists_url(&self, music_folder_id: Option<&str>) -> String {
        match music_folder_id {
            Some(id) => self.build_url("/rest/getArtists", &[("musicFolderId", id)]),
            None => self.build_url("/rest/getArtists", &[]),
        }
    }

    /// Folder-based index (`getIndexes`).
    ///
    /// With `if_modified_since` (milliseconds since the epoch) the server
    /// omits the index when nothing changed, which comes back as
    /// [`IndexesUpdate::Unchanged`].
    pub async fn get_indexes<P: PreferencesStore>(
        &self,
        parser: &IndexesParser<P>,
        music_folder_id: Option<&str>,
        if_modified_since: Option<u64>,
        progress: &dyn ProgressSink,
    ) -> Result<IndexesUpdate, IndexesError> {
        let url = self.indexes_url(music_folder_id, if_modified_since);
        let body = self.fetch(&url).await?;
        debug!("getIndexes returned {} bytes", body.len());
        parser.parse_xml(body.as_slice(), progress)
    }

    /// ID3-tag based index (`getArtists`).
    pub async fn get_artists<P: PreferencesStore>(
        &self,
        parser: &IndexesParser<P>,
        music_folder_id: Option<&str>,
        progress: &dyn ProgressSink,
    ) -> Result<IndexesUpdate, IndexesError> {
        let url = self.artists_url(music_folder_id);
        let body = self.fetch(&url).await?;
        debug!("getArtists returned {} bytes", body.len());
        parser.parse_xml(body.as_slice(), progress)
    }
}

/// Compute the MD5 hex digest of a string.
fn md5_hex(input: &str) -> String {
    use md5::Digest;
    let hash = md5::Md5::digest(input.as_bytes());
    hex::encode(hash)
}

/// Generate a random alphanumeric salt string.
fn generate_salt() -> String {
    use rand::Rng;
    let mut rng = rand::rng();
    (0..16)
        .map(|_| {
            let idx = rng.random_range(0..36u8);
            if idx < 10 {
                (b'0' + idx) as char
            } else {
                (b'a' + idx - 10) as char
            }
        })
        .collect()
}
