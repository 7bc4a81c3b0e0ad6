use parse_display::Display;

pub const ETH_CONSENSUS_VERSION: &str = "eth-consensus-version";

#[derive(Clone, Copy, Debug, Display)]
#[display(style = "lowercase")]
pub enum Direction {
    Request,
    Response,
}
