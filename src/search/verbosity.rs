/// How much the planner reports while it runs.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[clap(rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Verbosity {
    #[clap(help = "Errors only.")]
    Quiet,
    #[default]
    #[clap(help = "Search progress and the final statistics.")]
    Normal,
    #[clap(help = "Also heuristic improvements and preprocessing details.")]
    Verbose,
    #[clap(help = "Everything, including per-node traces.")]
    Debug,
}

impl From<Verbosity> for tracing::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Quiet => tracing::Level::ERROR,
            Verbosity::Normal => tracing::Level::INFO,
            Verbosity::Verbose => tracing::Level::DEBUG,
            Verbosity::Debug => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn levels_grow_with_verbosity() {
        let levels: Vec<tracing::Level> = Verbosity::value_variants()
            .iter()
            .map(|&verbosity| verbosity.into())
            .collect();
        assert!(levels.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(tracing::Level::from(Verbosity::default()), tracing::Level::INFO);
    }
}
