/// Bumped whenever the aggregation changes in a way that warrants reparsing stored matches.
pub const PARSER_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    pub parser_version: u32,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parser_version: PARSER_VERSION,
        }
    }
}
