//! CLI domain: parse, route, output, and presentation only.
//! No domain logic; the route table dispatches to replay and config services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_json, format_config_text, format_replay_json, format_replay_text,
    format_section_heading,
};
pub use route::RunContext;
