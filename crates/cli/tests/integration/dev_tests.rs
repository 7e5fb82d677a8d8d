//! Dev mode integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

/// Dev server stand-in that succeeds once the executable has written its
/// arguments, and fails if it never does.
const WAIT_FOR_LAUNCH: &str =
  "for i in 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20; do [ -f build/launched.txt ] && exit 0; sleep 0.25; done; exit 1";

#[test]
fn dev_launches_executable_then_dev_server() {
  let env = TestEnv::new();
  env.write_script("build/app", "echo \"$@\" > launched.txt");
  let mut config = env.config();
  config["node"]["build"]["commands"]["dev"] = WAIT_FOR_LAUNCH.into();
  env.write_config(&config);

  env
    .webui_cmd()
    .args(["dev", "no-reload"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dev session finished"));

  assert_eq!(env.read("build/launched.txt").trim(), "--run-dev 5173 8081");
  assert!(env.read("index.html").contains("http://localhost:8081/webui.js"));

  let calls = env.cmake_calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].starts_with("--build "));
}

#[test]
fn dev_builds_debug_variant() {
  let env = TestEnv::new();
  env.write_script("build/app", "exit 0");
  env.write_config(&env.config());

  env.webui_cmd().arg("dev").assert().success();

  assert!(env.cmake_calls()[0].contains("-DCMAKE_BUILD_TYPE=Debug"));
}

#[test]
fn dev_without_executable_never_starts_dev_server() {
  let env = TestEnv::new();
  let mut config = env.config();
  config["node"]["build"]["commands"]["dev"] = "touch dev-server-started".into();
  env.write_config(&config);

  env
    .webui_cmd()
    .args(["dev", "no-cpp"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("target executable not found"));

  assert!(!env.path("dev-server-started").exists());
}

#[test]
fn failing_executable_does_not_fail_dev_run() {
  let env = TestEnv::new();
  env.write_script("build/app", "echo boom >&2; exit 7");
  env.write_config(&env.config());

  env.webui_cmd().args(["dev", "no-cpp"]).assert().success();
}

#[test]
fn unlaunchable_executable_still_starts_dev_server() {
  let env = TestEnv::new();
  env.write_file("build/app", "not a program");
  let mut config = env.config();
  config["node"]["build"]["commands"]["dev"] = "touch dev-server-started".into();
  env.write_config(&config);

  env
    .webui_cmd()
    .args(["dev", "no-cpp"])
    .assert()
    .success()
    .stderr(predicate::str::contains("failed to launch target executable"));

  assert!(env.path("dev-server-started").exists());
}
