use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6379;

/// Parses the positional connection arguments.
///
/// Accepts nothing (defaults to `localhost:6379`), a single `host` or
/// `host:port`, or `host port`. Anything past the first two positionals is
/// ignored.
pub fn parse_host_port<I>(args: I) -> Result<(String, u16)>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    match args.as_slice() {
        [] => Ok((DEFAULT_HOST.to_string(), DEFAULT_PORT)),
        [single] => match single.split_once(':') {
            Some((host, port)) => Ok((host.to_string(), parse_port(port)?)),
            None => Ok((single.clone(), DEFAULT_PORT)),
        },
        [host, port, ..] => Ok((host.clone(), parse_port(port)?)),
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.parse()
        .with_context(|| format!("invalid port `{raw}`"))
}
