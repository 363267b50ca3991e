//! Remote URL construction for the `--init` bootstrap flow.

use crate::error::ConfigError;

/// Protocols for which an explicit port is written into the URL.
const PORT_PROTOCOLS: &[&str] = &["ssh", "git", "rsync", "http", "https", "ftp", "ftps"];

/// The pieces of a remote location as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteSpec {
    pub protocol: Option<String>,
    pub remote_user: Option<String>,
    pub remote_host: Option<String>,
    pub remote_path: Option<String>,
    pub remote_port: Option<String>,
}

impl RemoteSpec {
    /// Build `protocol://[user@]host[:port]/path`.
    ///
    /// - the user is only written for `ssh`
    /// - the host is omitted for `file`
    /// - the port is only written for protocols that accept one
    pub fn url(&self) -> Result<String, ConfigError> {
        let protocol = non_empty(&self.protocol)
            .ok_or_else(|| ConfigError::Invalid("--protocol is required for --init".into()))?;

        let mut url = format!("{protocol}://");

        if protocol == "ssh" {
            if let Some(user) = non_empty(&self.remote_user) {
                url.push_str(user);
                url.push('@');
            }
        }

        if protocol != "file" {
            let host = non_empty(&self.remote_host).ok_or_else(|| {
                ConfigError::Invalid(format!("--remote_host is required for protocol '{protocol}'"))
            })?;
            url.push_str(host);
        }

        if let Some(port) = non_empty(&self.remote_port) {
            if PORT_PROTOCOLS.contains(&protocol) {
                url.push(':');
                url.push_str(port);
            }
        }

        url.push('/');
        url.push_str(self.remote_path.as_deref().unwrap_or_default());
        Ok(url)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
