//! webui-build: build orchestration for WebUI desktop apps
//!
//! A WebUI app is a native executable (built with CMake) hosting a web
//! front-end (built with a JS bundler). This crate drives both tools:
//! - `config`: the JSON build configuration and project paths
//! - `native`: CMake generate/build and webview loader placement
//! - `web`: `index.html` templating, bundling and bundle copy
//! - `dev`: detached launch of the executable against the dev server
//! - `pipeline`: the ordered run of all phases for one invocation

pub mod config;
pub mod context;
pub mod dev;
pub mod exec;
pub mod native;
pub mod pipeline;
pub mod platform;
pub mod util;
pub mod web;
