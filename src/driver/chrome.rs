//! Chromium-family executable discovery.

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;

use tracing::debug;

use crate::config::Channel;

// ============================================================================
// Discovery
// ============================================================================

/// Finds an installed executable for the requested release channel.
///
/// Walks a per-OS candidate list and returns the first path that exists.
/// Returns `None` when nothing from the channel's family is installed.
pub(crate) fn find_executable(channel: Channel) -> Option<PathBuf> {
    let found = candidate_paths(channel).into_iter().find(|p| p.exists());
    match &found {
        Some(path) => debug!(channel = %channel, path = %path.display(), "Executable found"),
        None => debug!(channel = %channel, "No executable found"),
    }
    found
}

/// Candidate executable paths for a channel, most specific first.
fn candidate_paths(channel: Channel) -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        windows_candidates(channel)
    } else if cfg!(target_os = "macos") {
        macos_candidates(channel)
    } else {
        linux_candidates(channel)
    }
}

fn windows_candidates(channel: Channel) -> Vec<PathBuf> {
    let suffix = match channel {
        Channel::Chromium => r"Chromium\Application\chrome.exe",
        Channel::Chrome => r"Google\Chrome\Application\chrome.exe",
        Channel::Msedge => r"Microsoft\Edge\Application\msedge.exe",
    };

    let mut paths = vec![
        PathBuf::from(format!(r"C:\Program Files\{suffix}")),
        PathBuf::from(format!(r"C:\Program Files (x86)\{suffix}")),
    ];
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        paths.push(PathBuf::from(format!(r"{local}\{suffix}")));
    }
    paths
}

fn macos_candidates(channel: Channel) -> Vec<PathBuf> {
    let app = match channel {
        Channel::Chromium => "/Applications/Chromium.app/Contents/MacOS/Chromium",
        Channel::Chrome => "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        Channel::Msedge => "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
    };
    vec![PathBuf::from(app)]
}

fn linux_candidates(channel: Channel) -> Vec<PathBuf> {
    let names: &[&str] = match channel {
        Channel::Chromium => &["chromium", "chromium-browser"],
        Channel::Chrome => &["google-chrome", "google-chrome-stable"],
        Channel::Msedge => &["microsoft-edge", "microsoft-edge-stable"],
    };

    names
        .iter()
        .flat_map(|name| {
            [
                PathBuf::from(format!("/usr/bin/{name}")),
                PathBuf::from(format!("/usr/local/bin/{name}")),
                PathBuf::from(format!("/snap/bin/{name}")),
            ]
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_nonempty_for_every_channel() {
        for channel in [Channel::Chromium, Channel::Chrome, Channel::Msedge] {
            assert!(!candidate_paths(channel).is_empty());
        }
    }

    #[test]
    fn test_channels_search_distinct_families() {
        let chrome = candidate_paths(Channel::Chrome);
        let edge = candidate_paths(Channel::Msedge);
        assert!(chrome.iter().all(|p| !edge.contains(p)));
    }
}
