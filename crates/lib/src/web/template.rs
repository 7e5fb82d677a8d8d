//! `index.html` generation.
//!
//! The template carries a marker that is swapped for the bridge script tag:
//! in dev mode the script comes from the host's bridge server, in build mode
//! it is served next to the page.

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::WebError;
use crate::config::Project;
use crate::context::Mode;

/// Script the host bridge serves.
pub const BRIDGE_SCRIPT: &str = "webui.js";

/// The `<script>` tag injected for `mode`.
pub fn bridge_tag(mode: Mode, bridge_port: u16) -> String {
  match mode {
    Mode::Dev => format!(
      r#"<script src="http://localhost:{}/{}"></script>"#,
      bridge_port, BRIDGE_SCRIPT
    ),
    Mode::Build => format!(r#"<script src="{}"></script>"#, BRIDGE_SCRIPT),
  }
}

/// Replace the first `marker` in `template` with `tag`.
///
/// Returns the rendered page and whether the marker was found.
pub fn render(template: &str, marker: &str, tag: &str) -> (String, bool) {
  match template.find(marker) {
    Some(_) if !marker.is_empty() => (template.replacen(marker, tag, 1), true),
    _ => (template.to_string(), false),
  }
}

/// Render the configured template into the configured `index.html`,
/// overwriting it.
pub fn generate_index_html(project: &Project, mode: Mode) -> Result<PathBuf, WebError> {
  let template_path = project.index_template();
  if !template_path.is_file() {
    return Err(WebError::TemplateMissing { path: template_path });
  }

  info!(template = %template_path.display(), "generating index.html");
  let template = fs::read_to_string(&template_path).map_err(|source| WebError::Io {
    path: template_path.clone(),
    source,
  })?;

  let config = project.config();
  let marker = &config.web.build.sub_strings.webui_bridge;
  let tag = bridge_tag(mode, config.web.debug.webui_server);
  let (html, substituted) = render(&template, marker, &tag);
  if !substituted {
    warn!(marker = %marker, template = %template_path.display(), "bridge marker not found in template");
  }

  let out = project.index_html();
  fs::write(&out, html).map_err(|source| WebError::Io {
    path: out.clone(),
    source,
  })?;
  info!(path = %out.display(), "generated index.html");

  Ok(out)
}
