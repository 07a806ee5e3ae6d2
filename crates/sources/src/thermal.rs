//! CPU temperature

use crate::error::{MetricError, MetricResult};
use crate::shared_system;
use std::fs;
use std::path::Path;

/// Labels that identify the SoC or CPU sensor among sysinfo components
const CPU_SENSOR_HINTS: &[&str] = &["cpu", "soc", "package", "k10temp", "coretemp"];

/// Degrees Celsius from a thermal zone file holding millidegrees
pub(crate) fn read_thermal_zone(path: &Path) -> MetricResult<f32> {
    let raw = fs::read_to_string(path).map_err(|source| MetricError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_millidegrees(&raw)
}

pub(crate) fn parse_millidegrees(raw: &str) -> MetricResult<f32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(|milli| milli as f32 / 1000.0)
        .map_err(|_| MetricError::Parse {
            what: "thermal zone",
            input: trimmed.to_string(),
        })
}

/// First sysinfo component that looks like the CPU
pub(crate) fn component_temperature() -> MetricResult<f32> {
    let mut components = shared_system::components();
    components.refresh();
    components
        .iter()
        .find(|c| {
            let label = c.label().to_lowercase();
            CPU_SENSOR_HINTS.iter().any(|hint| label.contains(hint))
        })
        .map(|c| c.temperature())
        .filter(|t| t.is_finite())
        .ok_or(MetricError::NoSensor)
}

pub(crate) fn format_celsius(degrees: f32) -> String {
    format!("{:.1}°C", degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_millidegrees() {
        assert_eq!(parse_millidegrees("48312\n").unwrap(), 48.312);
        assert_eq!(parse_millidegrees("-5000").unwrap(), -5.0);
        assert!(matches!(
            parse_millidegrees("hot"),
            Err(MetricError::Parse { .. })
        ));
    }

    #[test]
    fn test_format_celsius() {
        assert_eq!(format_celsius(48.312), "48.3°C");
    }

    #[test]
    fn test_read_thermal_zone_file() {
        let path = std::env::temp_dir().join(format!("oled-sens-thermal-{}", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "51234").unwrap();
        }
        assert_eq!(format_celsius(read_thermal_zone(&path).unwrap()), "51.2°C");
        fs::remove_file(&path).unwrap();

        assert!(matches!(
            read_thermal_zone(&path),
            Err(MetricError::Io { .. })
        ));
    }
}
