use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "spacex-dashboard",
    version,
    about = "Interactive dashboard of SpaceX launch records"
)]
pub struct Cli {
    /// Launch records file loaded at startup (.csv, .json or .parquet)
    #[arg(long, default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initial window width in points
    #[arg(long, default_value_t = 1200.0)]
    pub width: f32,

    /// Initial window height in points
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["spacex-dashboard"]);
        assert_eq!(cli.data, PathBuf::from("spacex_launch_dash.csv"));
        assert_eq!((cli.width, cli.height), (1200.0, 900.0));
    }

    #[test]
    fn custom_data_path() {
        let cli = Cli::parse_from(["spacex-dashboard", "--data", "launches.parquet", "--width", "800"]);
        assert_eq!(cli.data, PathBuf::from("launches.parquet"));
        assert_eq!(cli.width, 800.0);
    }
}
