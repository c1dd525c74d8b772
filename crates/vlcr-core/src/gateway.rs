//! HTTP calls to VLC's `requests/*` endpoints.

use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::bus::{Bus, BusEvent};
use crate::config::VlcConfig;
use crate::protocol::{BrowseListing, DirectoryNode, Params, PlayerStatus, PlaylistNode};
use crate::{Error, Result};

/// Which endpoint a command goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    Status = 0,
    Playlist = 1,
    Vlm = 2,
}

impl Mode {
    pub fn endpoint(self) -> &'static str {
        match self {
            Mode::Status => "requests/status.json",
            Mode::Playlist => "requests/playlist.json",
            Mode::Vlm => "requests/vlm_cmd.xml",
        }
    }
}

impl TryFrom<u8> for Mode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Mode::Status),
            1 => Ok(Mode::Playlist),
            2 => Ok(Mode::Vlm),
            other => Err(Error::UnknownMode(other)),
        }
    }
}

const BROWSE_ENDPOINT: &str = "requests/browse.json";

/// Cheap to clone; clones share the connection pool and the bus.
#[derive(Clone)]
pub struct Gateway {
    client: Client,
    base_url: String,
    password: Option<String>,
    bus: Arc<Bus>,
}

impl Gateway {
    pub fn new(config: &VlcConfig, bus: Arc<Bus>) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config.base_url(), &config.password, bus))
    }

    pub fn with_client(client: Client, base_url: String, password: &str, bus: Arc<Bus>) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        Self {
            client,
            base_url,
            password: (!password.is_empty()).then(|| password.to_string()),
            bus,
        }
    }

    pub fn bus(&self) -> &Arc<Bus> {
        &self.bus
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, endpoint: &str, params: &Params) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.get(url).query(params.pairs());
        if let Some(password) = &self.password {
            request = request.basic_auth("", Some(password));
        }
        request
    }

    async fn fetch(&self, endpoint: &'static str, params: &Params) -> Result<reqwest::Response> {
        debug!(endpoint, ?params, "vlc request");
        let response = self.get(endpoint, params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { endpoint, status });
        }
        Ok(response)
    }

    /// Issue one command. Only `Mode::Playlist` yields a value; it is also
    /// published as `PopulatePlaylist` before returning.
    pub async fn send_command(&self, mode: Mode, params: &Params) -> Result<Option<PlaylistNode>> {
        let response = self.fetch(mode.endpoint(), params).await?;
        match mode {
            Mode::Playlist => {
                let body = response.bytes().await?;
                let tree: PlaylistNode = serde_json::from_slice(&body)?;
                self.bus.emit(&BusEvent::PopulatePlaylist(tree.clone()));
                Ok(Some(tree))
            }
            Mode::Status | Mode::Vlm => Ok(None),
        }
    }

    /// Spawn `send_command` and log a failure instead of returning it.
    pub fn fire(&self, mode: Mode, params: Params) -> JoinHandle<()> {
        let gateway = self.clone();
        tokio::spawn(async move {
            if let Err(e) = gateway.send_command(mode, &params).await {
                warn!("{:?} command failed: {}", mode, e);
            }
        })
    }

    pub async fn status(&self, params: &Params) -> Result<PlayerStatus> {
        let body = self.fetch(Mode::Status.endpoint(), params).await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    pub async fn browse(&self, dir: &str) -> Result<Vec<DirectoryNode>> {
        let body = self
            .fetch(BROWSE_ENDPOINT, &Params::browse(dir))
            .await?
            .bytes()
            .await?;
        let listing: BrowseListing = serde_json::from_slice(&body)?;
        Ok(listing.element)
    }

    /// Run a VLM command and return VLC's XML answer verbatim.
    pub async fn vlm(&self, command: &str) -> Result<String> {
        let response = self.fetch(Mode::Vlm.endpoint(), &Params::vlm(command)).await?;
        Ok(response.text().await?)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url)
            .field("auth", &self.password.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_number() {
        assert_eq!(Mode::try_from(0).unwrap(), Mode::Status);
        assert_eq!(Mode::try_from(1).unwrap(), Mode::Playlist);
        assert_eq!(Mode::try_from(2).unwrap(), Mode::Vlm);
        assert!(matches!(Mode::try_from(3), Err(Error::UnknownMode(3))));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let bus = Arc::new(Bus::new());
        let gw = Gateway::with_client(Client::new(), "http://vlc:8080".into(), "", bus);
        assert_eq!(gw.base_url(), "http://vlc:8080/");
        assert!(gw.password.is_none());
    }
}
