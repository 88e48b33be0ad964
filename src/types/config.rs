use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StarcutConfig {
    pub engine: Option<EngineConfig>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Star year used when the CLI does not pass --year.
    pub default_year: Option<i32>,
    /// Entity used when the CLI does not pass --entity.
    pub default_entity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_decimals() -> u8 {
    2
}

impl StarcutConfig {
    pub fn default_year(&self) -> Option<i32> {
        self.engine.as_ref().and_then(|engine| engine.default_year)
    }

    pub fn default_entity(&self) -> Option<&str> {
        self.engine
            .as_ref()
            .and_then(|engine| engine.default_entity.as_deref())
    }

    pub fn decimals(&self) -> u8 {
        self.report
            .as_ref()
            .map(|report| report.decimals)
            .unwrap_or_else(default_decimals)
    }
}
