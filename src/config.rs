use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for Wheelhouse
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WheelhouseConfig {
    /// Artifact store settings
    pub artifact: ArtifactConfig,
    /// Wheel-test run settings
    pub run: RunConfig,
    /// Platform-specific setup (Windows dev drive)
    pub platform: PlatformConfig,
    /// Summary sink settings
    pub summary: SummaryConfig,
    /// Observability settings
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtifactConfig {
    /// Directory acting as the artifact store, keyed by artifact name
    pub store_dir: String,
    /// Name prefix of the binary artifact produced by the upstream build
    pub binary_prefix: String,
    /// Name prefix under which the test logs are published
    pub logs_prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunConfig {
    /// File name of the tested binary inside the release directory
    pub binary_name: String,
    /// Task the tested binary runs to exercise the wheel corpus
    pub test_task: String,
    /// Pass --locked to the tested binary
    pub locked: bool,
    /// Option string handed to the test tool via its environment
    pub tool_opts: String,
    /// Text I/O encoding directive (PYTHONIOENCODING)
    pub io_encoding: String,
    /// Wall-clock ceiling for a whole invocation, in minutes
    pub timeout_minutes: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlatformConfig {
    /// PowerShell script that provisions the high-performance volume
    pub dev_drive_script: String,
    /// Where the workspace is mirrored on the provisioned volume
    pub dev_drive_root: String,
    /// Shell used to run the provisioning script
    pub powershell: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SummaryConfig {
    /// Fallback sink when GITHUB_STEP_SUMMARY is not set in the environment
    pub sink_file: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for WheelhouseConfig {
    fn default() -> Self {
        Self {
            artifact: ArtifactConfig {
                store_dir: ".wheelhouse/artifacts".to_string(),
                binary_prefix: "pixi".to_string(),
                logs_prefix: "wheel-tests-logs".to_string(),
            },
            run: RunConfig {
                binary_name: "pixi".to_string(),
                test_task: "test-common-wheels-ci".to_string(),
                locked: true,
                tool_opts: "--color=always".to_string(),
                io_encoding: "utf-8".to_string(),
                timeout_minutes: 120,
            },
            platform: PlatformConfig {
                dev_drive_script: ".github/workflows/setup-dev-drive.ps1".to_string(),
                dev_drive_root: "D:/wheelhouse".to_string(),
                powershell: "pwsh".to_string(),
            },
            summary: SummaryConfig {
                sink_file: ".wheelhouse/step-summary.md".to_string(),
            },
            observability: ObservabilityConfig {
                log_level: "info".to_string(),
                json_logs: false,
            },
        }
    }
}

impl WheelhouseConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (wheelhouse.toml, .wheelhouse-rc)
    /// 3. Environment variables (prefixed with WHEELHOUSE_)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&WheelhouseConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new("wheelhouse.toml").exists() {
            builder = builder.add_source(File::with_name("wheelhouse"));
        }

        if Path::new(".wheelhouse-rc").exists() {
            builder = builder.add_source(File::with_name(".wheelhouse-rc"));
        }

        builder = builder.add_source(
            Environment::with_prefix("WHEELHOUSE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let wheelhouse_config: WheelhouseConfig = config.try_deserialize()?;

        Ok(wheelhouse_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<WheelhouseConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let _ = WheelhouseConfig::load_env_file();
        WheelhouseConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static WheelhouseConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup)
pub fn init_config() -> Result<()> {
    let _config = config()?;
    tracing::info!("Configuration loaded successfully");
    Ok(())
}
