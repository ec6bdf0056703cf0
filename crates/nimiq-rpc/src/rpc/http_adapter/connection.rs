use reqwest::Url;

use crate::error::Error;

pub(super) fn parse_connection(connection: &str) -> Result<Url, Error> {
    let parsed = Url::parse(connection).map_err(|e| {
        Error::Config(format!(
            "invalid connection `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::Config(format!(
            "unsupported connection scheme `{other}`; expected http or https"
        ))),
    }
}
