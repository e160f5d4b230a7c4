//! Local WiFi network enumeration.
//!
//! Wraps the platform scan utility (nmcli, airport, netsh) behind one
//! adapter. The scan runs an external OS command, so the whole operation is
//! gated by an explicit authorization flag: when the gate is off the command
//! is never spawned and the record carries an authorization note instead.
//!
//! The platform variant is selected once at startup; each variant owns its
//! own command line and output parser.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;

use crate::config::{WIFI_NETWORK_LIMIT, WIFI_SCAN_TIMEOUT};
use crate::error_handling::ProviderStats;
use crate::providers::Category;
use crate::utils::sanitize_error_message;

/// Host platform for WiFi scanning, detected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPlatform {
    Linux,
    MacOs,
    Windows,
    Unsupported,
}

impl ScanPlatform {
    /// Detects the host platform.
    pub fn detect() -> Self {
        match std::env::consts::OS {
            "linux" => ScanPlatform::Linux,
            "macos" => ScanPlatform::MacOs,
            "windows" => ScanPlatform::Windows,
            _ => ScanPlatform::Unsupported,
        }
    }

    /// Platform label reported in scan records.
    pub fn label(&self) -> &'static str {
        match self {
            ScanPlatform::Linux => "Linux",
            ScanPlatform::MacOs => "Darwin",
            ScanPlatform::Windows => "Windows",
            ScanPlatform::Unsupported => "Unsupported",
        }
    }

    /// Scan command line for this platform, if any.
    fn command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            ScanPlatform::Linux => Some((
                "nmcli",
                &["-t", "-f", "SSID,SIGNAL,SECURITY", "device", "wifi", "list"],
            )),
            ScanPlatform::MacOs => Some((
                "/System/Library/PrivateFrameworks/Apple80211.framework/Versions/Current/Resources/airport",
                &["-s"],
            )),
            ScanPlatform::Windows => Some(("netsh", &["wlan", "show", "profiles"])),
            ScanPlatform::Unsupported => None,
        }
    }

    /// Parses the scan command's stdout into network records.
    fn parse_output(&self, stdout: &str) -> Vec<WifiNetwork> {
        let networks = match self {
            ScanPlatform::Linux => parse_nmcli(stdout),
            ScanPlatform::MacOs => parse_airport(stdout),
            ScanPlatform::Windows => parse_netsh(stdout),
            ScanPlatform::Unsupported => Vec::new(),
        };
        networks.into_iter().take(WIFI_NETWORK_LIMIT).collect()
    }
}

/// One discovered (or saved) WiFi network.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct WifiNetwork {
    pub ssid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl WifiNetwork {
    fn named(ssid: &str) -> Self {
        WifiNetwork {
            ssid: ssid.to_string(),
            signal: None,
            security: None,
            bssid: None,
            rssi: None,
            channel: None,
            note: None,
        }
    }
}

/// Result record for one WiFi scan.
#[derive(Debug, Clone, Serialize)]
pub struct WifiScanRecord {
    pub networks: Vec<WifiNetwork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub platform: String,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// WiFi scan adapter.
pub struct WifiScanner {
    platform: ScanPlatform,
    enabled: bool,
    stats: Arc<ProviderStats>,
}

impl WifiScanner {
    pub fn new(platform: ScanPlatform, enabled: bool, stats: Arc<ProviderStats>) -> Self {
        WifiScanner {
            platform,
            enabled,
            stats,
        }
    }

    /// Scans for nearby networks.
    ///
    /// Fails soft on every path: a disabled gate, an unsupported platform,
    /// a missing utility, a non-zero exit, or a timeout all produce a
    /// normal record with empty networks and an explanatory note.
    pub async fn scan(&self, location: Option<String>) -> WifiScanRecord {
        let mut record = WifiScanRecord {
            networks: Vec::new(),
            location,
            platform: self.platform.label().to_string(),
            note: "WiFi scanning requires proper authorization and may be restricted".to_string(),
            error: None,
        };

        if !self.enabled {
            record.note = "WiFi scanning is not authorized; start the server with \
                           --enable-wifi-scan to allow it"
                .to_string();
            return record;
        }

        let Some((program, args)) = self.platform.command() else {
            return record;
        };

        match run_scan_command(program, args, WIFI_SCAN_TIMEOUT).await {
            Ok(stdout) => {
                record.networks = self.platform.parse_output(&stdout);
            }
            Err(message) => {
                log::warn!("WiFi scan failed on {}: {message}", self.platform.label());
                self.stats.record_soft_failure(Category::Wifi);
                record.error = Some(sanitize_error_message(&message));
                record.note = "WiFi scanning may require elevated permissions".to_string();
            }
        }

        record
    }
}

/// Runs the scan command with a timeout, returning its stdout.
async fn run_scan_command(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> Result<String, String> {
    let output = tokio::time::timeout(timeout, Command::new(program).args(args).output())
        .await
        .map_err(|_| format!("scan command timed out after {}s", timeout.as_secs()))?
        .map_err(|e| format!("failed to run scan command: {e}"))?;

    if !output.status.success() {
        return Err(format!("scan command exited with {}", output.status));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// `nmcli -t` output: one `SSID:SIGNAL:SECURITY` triple per line.
fn parse_nmcli(stdout: &str) -> Vec<WifiNetwork> {
    stdout
        .lines()
        .filter_map(|line| {
            let parts: Vec<&str> = line.split(':').collect();
            if line.is_empty() || parts.len() < 3 {
                return None;
            }
            let mut network = WifiNetwork::named(parts[0]);
            network.signal = Some(parts[1].to_string());
            network.security = Some(parts[2].to_string());
            Some(network)
        })
        .collect()
}

/// `airport -s` output: header line, then whitespace-separated columns.
fn parse_airport(stdout: &str) -> Vec<WifiNetwork> {
    stdout
        .lines()
        .skip(1) // Skip header
        .filter_map(|line| {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 6 {
                return None;
            }
            let mut network = WifiNetwork::named(parts[0]);
            network.bssid = Some(parts[1].to_string());
            network.rssi = Some(parts[2].to_string());
            network.channel = Some(parts[3].to_string());
            network.security = Some(parts[4..].join(" "));
            Some(network)
        })
        .collect()
}

/// `netsh wlan show profiles` output: saved profile names only.
fn parse_netsh(stdout: &str) -> Vec<WifiNetwork> {
    stdout
        .lines()
        .filter(|line| line.contains("All User Profile") || line.contains("User Profile"))
        .filter_map(|line| {
            let (_, ssid) = line.split_once(':')?;
            let ssid = ssid.trim();
            if ssid.is_empty() {
                return None;
            }
            let mut network = WifiNetwork::named(ssid);
            network.note = Some("Saved profile".to_string());
            Some(network)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner(platform: ScanPlatform, enabled: bool) -> WifiScanner {
        WifiScanner::new(platform, enabled, Arc::new(ProviderStats::new()))
    }

    #[tokio::test]
    async fn test_gate_off_never_scans() {
        let scanner = scanner(ScanPlatform::Linux, false);
        let record = scanner.scan(Some("office".to_string())).await;
        assert!(record.networks.is_empty());
        assert!(record.error.is_none());
        assert!(record.note.contains("not authorized"));
        assert_eq!(record.location.as_deref(), Some("office"));
    }

    #[tokio::test]
    async fn test_unsupported_platform_is_empty() {
        let scanner = scanner(ScanPlatform::Unsupported, true);
        let record = scanner.scan(None).await;
        assert!(record.networks.is_empty());
        assert!(record.error.is_none());
        assert_eq!(record.platform, "Unsupported");
    }

    #[test]
    fn test_parse_nmcli_lines() {
        let stdout = "HomeNet:82:WPA2\nCafe Guest:41:\n\nshort:line\n";
        let networks = parse_nmcli(stdout);
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].ssid, "HomeNet");
        assert_eq!(networks[0].signal.as_deref(), Some("82"));
        assert_eq!(networks[0].security.as_deref(), Some("WPA2"));
        assert_eq!(networks[1].ssid, "Cafe Guest");
        assert_eq!(networks[1].security.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_nmcli_preserves_order_and_caps_at_limit() {
        let stdout: String = (0..20)
            .map(|i| format!("net{i}:{i}:WPA2\n"))
            .collect();
        let networks = ScanPlatform::Linux.parse_output(&stdout);
        assert_eq!(networks.len(), WIFI_NETWORK_LIMIT);
        assert_eq!(networks[0].ssid, "net0");
        assert_eq!(networks[9].ssid, "net9");
    }

    #[test]
    fn test_parse_airport_skips_header_and_short_lines() {
        let stdout = "\
                      SSID BSSID             RSSI CHANNEL HT CC SECURITY\n\
                      HomeNet 00:11:22:33:44:55 -52 36 Y US WPA2(PSK/AES/AES)\n\
                      junk line\n";
        let networks = parse_airport(stdout);
        assert_eq!(networks.len(), 1);
        assert_eq!(networks[0].ssid, "HomeNet");
        assert_eq!(networks[0].bssid.as_deref(), Some("00:11:22:33:44:55"));
        assert_eq!(networks[0].rssi.as_deref(), Some("-52"));
        assert_eq!(networks[0].channel.as_deref(), Some("36"));
        assert_eq!(networks[0].security.as_deref(), Some("Y US WPA2(PSK/AES/AES)"));
    }

    #[test]
    fn test_parse_netsh_profile_lines() {
        let stdout = "\
                      Profiles on interface Wi-Fi:\n\
                      \n\
                      Group policy profiles (read only)\n\
                      ---------------------------------\n\
                          <None>\n\
                      \n\
                      User profiles\n\
                      -------------\n\
                          All User Profile     : HomeNet\n\
                          All User Profile     : Cafe Guest\n";
        let networks = parse_netsh(stdout);
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].ssid, "HomeNet");
        assert_eq!(networks[0].note.as_deref(), Some("Saved profile"));
        assert_eq!(networks[1].ssid, "Cafe Guest");
    }

    #[test]
    fn test_detect_matches_host_os() {
        // Whatever the host is, detection must not fall through to a
        // platform the host does not match
        let platform = ScanPlatform::detect();
        match std::env::consts::OS {
            "linux" => assert_eq!(platform, ScanPlatform::Linux),
            "macos" => assert_eq!(platform, ScanPlatform::MacOs),
            "windows" => assert_eq!(platform, ScanPlatform::Windows),
            _ => assert_eq!(platform, ScanPlatform::Unsupported),
        }
    }
}
