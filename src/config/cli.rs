use crate::domain::model::BoundingBox;
use crate::utils::error::{GeocodeError, Result};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "geocode-chain")]
#[command(about = "Resolve an address by trying geocoding providers in priority order")]
pub struct CliConfig {
    /// Address to geocode
    pub address: String,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "geocoder.toml")]
    pub config: String,

    /// Bounding hint as south,west,north,east
    #[arg(long)]
    pub bounds: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn bounds_hint(&self) -> Result<Option<BoundingBox>> {
        self.bounds.as_deref().map(parse_bounds).transpose()
    }
}

/// 解析 "south,west,north,east" 格式的範圍
pub fn parse_bounds(raw: &str) -> Result<BoundingBox> {
    let invalid = |reason: &str| GeocodeError::InvalidConfigValueError {
        field: "bounds".to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let values = raw
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| invalid("Expected four comma-separated numbers"))?;

    let [south, west, north, east] = values[..] else {
        return Err(invalid("Expected four comma-separated numbers"));
    };
    if south > north {
        return Err(invalid("South must not be greater than north"));
    }
    if !(-90.0..=90.0).contains(&south) || !(-90.0..=90.0).contains(&north) {
        return Err(invalid("Latitude must be between -90 and 90"));
    }
    if !(-180.0..=180.0).contains(&west) || !(-180.0..=180.0).contains(&east) {
        return Err(invalid("Longitude must be between -180 and 180"));
    }

    Ok(BoundingBox {
        south,
        west,
        north,
        east,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bounds() {
        let bounds = parse_bounds("51.4, -0.2, 51.6, 0.1").unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                south: 51.4,
                west: -0.2,
                north: 51.6,
                east: 0.1
            }
        );

        assert!(parse_bounds("51.4,-0.2,51.6").is_err());
        assert!(parse_bounds("a,b,c,d").is_err());
        assert!(parse_bounds("52,0,51,1").is_err());
        assert!(parse_bounds("-91,0,0,1").is_err());
        assert!(parse_bounds("0,-181,1,1").is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let config = CliConfig::parse_from([
            "geocode-chain",
            "10 Downing Street, London",
            "--config",
            "custom.toml",
            "--bounds",
            "51.4,-0.2,51.6,0.1",
            "--format",
            "json",
        ]);

        assert_eq!(config.address, "10 Downing Street, London");
        assert_eq!(config.config, "custom.toml");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.bounds_hint().unwrap().is_some());
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["geocode-chain", ""]);
        assert_eq!(config.address, "");
        assert_eq!(config.config, "geocoder.toml");
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.bounds_hint().unwrap().is_none());
    }
}
