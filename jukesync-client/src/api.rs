//! Typed client for the jukebox server's playback state endpoint.

use crate::error::{ClientError, Result};
use jukesync_core::{PlaybackState, Song};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Number of transparent retries for transient HTTP failures
const MAX_RETRIES: u32 = 3;

/// Client for the server's state endpoint.
///
/// Wraps a reqwest client with transparent retries for transient failures,
/// the same middleware stack used for every other server call.
pub struct ServerClient {
    http: ClientWithMiddleware,
    state_url: Url,
}

impl ServerClient {
    /// Create a client for the given server.
    ///
    /// `state_path` is resolved against `base_url`; an absolute path
    /// replaces whatever path the base URL carries.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL or the joined state URL is invalid.
    pub fn new(base_url: &str, state_path: &str) -> Result<Self> {
        let base = Url::parse(base_url)?;
        let state_url = base.join(state_path)?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES);
        let http = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { http, state_url })
    }

    /// The resolved state endpoint URL
    #[must_use]
    pub const fn state_url(&self) -> &Url {
        &self.state_url
    }

    /// Fetch the current playback state from the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body cannot be decoded.
    pub async fn get_state(&self) -> Result<PlaybackState> {
        let response = self.http.get(self.state_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus { status });
        }
        let wire: WireState = response.json().await?;
        Ok(wire.into())
    }
}

/// Wire shape of the state endpoint response.
///
/// The server serializes in camelCase and reports durations as float
/// seconds and progress as a 0-100 percentage.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireState {
    #[serde(default)]
    current_song: Option<WireSong>,
    #[serde(default)]
    paused: bool,
    #[serde(default)]
    progress: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireSong {
    #[serde(default)]
    stream_url: Option<String>,
    #[serde(default)]
    duration: f64,
}

/// Convert float seconds into a Duration.
///
/// The server is not trusted here: negative, non-finite, and
/// out-of-range values all decode to zero instead of panicking.
fn seconds_to_duration(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(Duration::ZERO)
}

impl From<WireState> for PlaybackState {
    fn from(wire: WireState) -> Self {
        let current_song = wire.current_song.map(|song| Song {
            stream_url: song.stream_url,
            duration: seconds_to_duration(song.duration),
        });
        Self::new(current_song, wire.paused, wire.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> PlaybackState {
        match serde_json::from_str::<WireState>(json) {
            Ok(wire) => wire.into(),
            Err(e) => unreachable!("fixture must decode: {e}"),
        }
    }

    #[test]
    fn test_decode_playing_state() {
        let state = decode(
            r#"{"currentSong": {"streamUrl": "http://host/stream.mp3", "duration": 183.5},
                "paused": false, "progress": 42.0}"#,
        );
        assert_eq!(state.stream_url(), Some("http://host/stream.mp3"));
        assert!(!state.paused);
        assert!((state.progress - 42.0).abs() < f64::EPSILON);
        let Some(song) = state.current_song else {
            unreachable!("song present in fixture");
        };
        assert_eq!(song.duration, Duration::from_secs_f64(183.5));
    }

    #[test]
    fn test_decode_idle_state() {
        let state = decode(r#"{"currentSong": null, "paused": false, "progress": 0}"#);
        assert!(state.current_song.is_none());
    }

    #[test]
    fn test_decode_song_without_stream_url() {
        let state = decode(
            r#"{"currentSong": {"streamUrl": null, "duration": 10}, "paused": false, "progress": 0}"#,
        );
        assert!(state.current_song.is_some());
        assert!(state.stream_url().is_none());
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let state = decode("{}");
        assert!(state.current_song.is_none());
        assert!(!state.paused);
        assert!(state.progress.abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_duration_treated_as_zero() {
        let state = decode(
            r#"{"currentSong": {"streamUrl": "a.mp3", "duration": -5}, "paused": false, "progress": 50}"#,
        );
        assert_eq!(state.target_position(), Duration::ZERO);
    }

    #[test]
    fn test_huge_duration_treated_as_zero() {
        let state = decode(
            r#"{"currentSong": {"streamUrl": "a.mp3", "duration": 1e300}, "paused": false, "progress": 50}"#,
        );
        assert_eq!(state.stream_url(), Some("a.mp3"));
        assert_eq!(state.target_position(), Duration::ZERO);
    }

    #[test]
    fn test_state_url_resolution() {
        let Ok(client) = ServerClient::new("http://host:8080/prefix/", "/state") else {
            unreachable!("valid URL");
        };
        assert_eq!(client.state_url().as_str(), "http://host:8080/state");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(
            ServerClient::new("not a url", "/state"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    /// Serve a single canned HTTP response on a loopback listener and
    /// return the base URL to reach it.
    fn serve_once(status_line: &str, body: &str) -> String {
        use std::io::{Read, Write};

        let Ok(listener) = std::net::TcpListener::bind("127.0.0.1:0") else {
            unreachable!("loopback bind");
        };
        let Ok(addr) = listener.local_addr() else {
            unreachable!("local addr");
        };
        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0_u8; 4096];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_get_state_against_local_server() {
        let base = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"currentSong": {"streamUrl": "a.mp3", "duration": 200}, "paused": false, "progress": 50}"#,
        );
        let Ok(client) = ServerClient::new(&base, "/state") else {
            unreachable!("valid URL");
        };
        let Ok(state) = client.get_state().await else {
            unreachable!("request must succeed");
        };
        assert_eq!(state.stream_url(), Some("a.mp3"));
        assert_eq!(state.target_position(), Duration::from_secs(100));
    }

    #[tokio::test]
    async fn test_get_state_non_success_status() {
        let base = serve_once("HTTP/1.1 404 Not Found", "{}");
        let Ok(client) = ServerClient::new(&base, "/state") else {
            unreachable!("valid URL");
        };
        assert!(matches!(
            client.get_state().await,
            Err(ClientError::UnexpectedStatus { status }) if status.as_u16() == 404
        ));
    }
}
