//! Request/response activity console.
//!
//! When enabled, echoes the outgoing request and the server's answer so
//! the operator can see exactly what was exchanged. The API key is
//! always masked.

use std::io::Write;

use obitpub_client::{PublishError, PublishResponse};
use serde_json::Value;

use crate::settings::mask_secret;

pub struct Console<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self { out, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn request(&mut self, url: &str, api_key: &str, body: &Value) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        writeln!(self.out, ">> POST {url}")?;
        writeln!(self.out, ">> x-api-key: {}", mask_secret(api_key.trim()))?;
        writeln!(self.out, ">> Content-Type: application/json")?;
        writeln!(self.out, "{}", pretty(body))?;
        Ok(())
    }

    pub fn response(
        &mut self,
        result: &Result<PublishResponse, PublishError>,
    ) -> std::io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        match result {
            Ok(resp) => {
                writeln!(self.out, "<< success")?;
                let body = serde_json::to_value(resp).unwrap_or(Value::Null);
                writeln!(self.out, "{}", pretty(&body))?;
            }
            Err(PublishError::Api { status, body, message }) => {
                writeln!(self.out, "<< HTTP {status}")?;
                match body {
                    Some(body) => writeln!(self.out, "{}", pretty(body))?,
                    None => writeln!(self.out, "{message}")?,
                }
            }
            Err(e) if e.is_local() => {
                writeln!(self.out, "<< not sent: {e}")?;
            }
            Err(e) => {
                writeln!(self.out, "<< no response: {e}")?;
            }
        }
        Ok(())
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
