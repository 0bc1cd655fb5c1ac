use prometheus::{Gauge, Opts};

use crate::NAMESPACE;

const UNKNOWN: &str = "unknown";

/// Static build metadata exported as `puppet_last_run_exporter_build_info`.
///
/// `revision`, `branch` and `rustversion` come from the
/// `LASTRUN_GIT_REVISION`, `LASTRUN_GIT_BRANCH` and `LASTRUN_RUSTC_VERSION`
/// compile-time variables. The build script fills them from `git` and the
/// compiling `rustc` unless they are already set; anything it cannot detect
/// is reported as `unknown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub revision: &'static str,
    pub branch: &'static str,
    pub rustversion: &'static str,
}

impl BuildInfo {
    /// Metadata of the running binary.
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            revision: option_env!("LASTRUN_GIT_REVISION").unwrap_or(UNKNOWN),
            branch: option_env!("LASTRUN_GIT_BRANCH").unwrap_or(UNKNOWN),
            rustversion: option_env!("LASTRUN_RUSTC_VERSION").unwrap_or(UNKNOWN),
        }
    }

    /// Gauge fixed at `1` carrying the build metadata as constant labels.
    pub fn gauge(&self) -> Result<Gauge, prometheus::Error> {
        let opts = Opts::new(
            "build_info",
            "A metric with a constant '1' value labeled by version, revision, branch, and rustversion from which puppet_last_run_exporter was built.",
        )
        .namespace(NAMESPACE)
        .const_label("version", self.version)
        .const_label("revision", self.revision)
        .const_label("branch", self.branch)
        .const_label("rustversion", self.rustversion);

        let gauge = Gauge::with_opts(opts)?;
        gauge.set(1.0);
        Ok(gauge)
    }
}

#[cfg(test)]
mod tests {
    use prometheus::core::Collector;

    use super::*;

    #[test]
    fn current_uses_package_version() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.revision.is_empty());
    }

    #[test]
    fn rustversion_is_detected_at_build_time() {
        let info = BuildInfo::current();
        assert_ne!(info.rustversion, UNKNOWN);
        assert!(
            info.rustversion.starts_with(|c: char| c.is_ascii_digit()),
            "unexpected rustc version {:?}",
            info.rustversion
        );
    }

    #[test]
    fn gauge_is_one_with_static_labels() {
        let info = BuildInfo {
            version: "1.2.3",
            revision: "abc123",
            branch: "main",
            rustversion: "1.85.0",
        };
        let gauge = info.gauge().unwrap();
        assert_eq!(gauge.get(), 1.0);

        let families = gauge.collect();
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].name(), "puppet_last_run_exporter_build_info");

        let text = prometheus::TextEncoder::new()
            .encode_to_string(&families)
            .unwrap();
        for label in [
            r#"version="1.2.3""#,
            r#"revision="abc123""#,
            r#"branch="main""#,
            r#"rustversion="1.85.0""#,
        ] {
            assert!(text.contains(label), "missing {label} in {text}");
        }
    }
}
