use serde_json::Value;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn command(args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_md-filters"));
    cmd.args(args)
        .env_remove("MD_FILTERS_IMAGE_ROOT")
        .env_remove("MD_FILTERS_MMDC")
        .env_remove("MD_FILTERS_DOT")
        .env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute md-filters");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn md_filters(args: &[&str], stdin: &str) -> Output {
    run_with_stdin(command(args), stdin)
}

const HEADER_DOC: &str = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"Header","c":[1,["a",[],[]],[{"t":"Str","c":"A"}]]}]}"#;

#[test]
fn test_filters_stdin_to_stdout() {
    let output = md_filters(&["html5+smart"], HEADER_DOC);
    assert!(output.status.success());

    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        doc["blocks"][0]["c"][1][2][0],
        serde_json::json!(["style", "border-bottom:1px solid #cccccc"])
    );
}

#[test]
fn test_header_style_flag() {
    let output = md_filters(&["html", "--header-style", "color:red"], HEADER_DOC);
    let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["blocks"][0]["c"][1][2][0][1], "color:red");
}

#[test]
fn test_unknown_filter_exits_with_error() {
    let output = md_filters(&["html", "-F", "nope"], HEADER_DOC);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown filter 'nope'"), "stderr: {}", stderr);
}

#[test]
fn test_invalid_json_exits_with_error() {
    let output = md_filters(&["html"], "not json");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid Pandoc JSON"));
}

#[test]
fn test_metadata_warning_as_json() {
    let doc = r#"{"pandoc-api-version":[1,23,1],"meta":{"md-filters":{"t":"MetaMap","c":{"colour":{"t":"MetaString","c":"blue"}}}},"blocks":[]}"#;
    let output = md_filters(&["html", "--json-errors"], doc);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let warning: Value = stderr
        .lines()
        .find_map(|line| serde_json::from_str(line).ok())
        .expect("Expected a JSON warning on stderr");
    assert_eq!(warning["kind"], "warning");
    assert_eq!(warning["message"], "Unknown key 'md-filters.colour' ignored");
}

#[test]
fn test_list_filters() {
    let output = md_filters(&["--list-filters"], "");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "h1hr\nbq\ngraphviz\nmermaid\nop\n"
    );
}

#[test]
fn test_api_version_warning_as_json() {
    let doc = r#"{"pandoc-api-version":[1,22],"meta":{},"blocks":[]}"#;
    let output = md_filters(&["html", "--json-errors"], doc);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains('\u{1b}'), "stderr: {}", stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines.len(), 1, "stderr: {}", stderr);
    let warning: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(warning["kind"], "warning");
    assert!(
        warning["message"]
            .as_str()
            .unwrap()
            .contains("pandoc-api-version [1, 22]")
    );
}

#[test]
fn test_input_and_output_files() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("in.json");
    let output_path = dir.path().join("out.json");
    std::fs::write(&input, HEADER_DOC).unwrap();

    let output = md_filters(
        &[
            "html",
            "-i",
            input.to_str().unwrap(),
            "-o",
            output_path.to_str().unwrap(),
        ],
        "",
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let doc: Value = serde_json::from_str(&std::fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(doc["blocks"][0]["c"][1][2][0][0], "style");
}

#[test]
fn test_missing_input_file() {
    let output = md_filters(&["html", "-i", "/nonexistent/doc.json"], "");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open input file"), "stderr: {}", stderr);
}

#[cfg(unix)]
mod image_root {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const MERMAID_DOC: &str = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"CodeBlock","c":[["",["mermaid"],[]],"graph TD;"]}]}"#;

    fn copying_mmdc(dir: &Path) -> PathBuf {
        let path = dir.join("mmdc");
        fs::write(&path, "#!/bin/sh\ncp \"$2\" \"$4\"\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn image_dir_has_svg(root: &Path) -> bool {
        fs::read_dir(root.join("mermaid-images"))
            .map(|entries| {
                entries
                    .filter_map(|entry| entry.ok())
                    .any(|entry| entry.path().extension().is_some_and(|ext| ext == "svg"))
            })
            .unwrap_or(false)
    }

    #[test]
    fn test_image_root_from_environment() {
        let bin = TempDir::new().unwrap();
        let root = TempDir::new().unwrap();
        let mut cmd = command(&["html"]);
        cmd.env("MD_FILTERS_IMAGE_ROOT", root.path())
            .env("MD_FILTERS_MMDC", copying_mmdc(bin.path()));

        let output = run_with_stdin(cmd, MERMAID_DOC);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(image_dir_has_svg(root.path()));

        let doc: Value = serde_json::from_slice(&output.stdout).unwrap();
        let url = doc["blocks"][0]["c"][0]["c"][2][0].as_str().unwrap();
        assert!(url.starts_with(&root.path().to_string_lossy().replace('\\', "/")));
    }

    #[test]
    fn test_image_root_flag_overrides_environment() {
        let bin = TempDir::new().unwrap();
        let from_env = TempDir::new().unwrap();
        let from_flag = TempDir::new().unwrap();
        let mut cmd = command(&["html", "--image-root"]);
        cmd.arg(from_flag.path())
            .env("MD_FILTERS_IMAGE_ROOT", from_env.path())
            .env("MD_FILTERS_MMDC", copying_mmdc(bin.path()));

        let output = run_with_stdin(cmd, MERMAID_DOC);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(image_dir_has_svg(from_flag.path()));
        assert!(!from_env.path().join("mermaid-images").exists());
    }
}

#[cfg(unix)]
#[test]
fn test_missing_renderer_exits_with_error() {
    let doc = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"CodeBlock","c":[["",["mermaid"],[]],"graph TD;"]}]}"#;
    let root = tempfile::TempDir::new().unwrap();
    let mut cmd = command(&["html", "--image-root"]);
    cmd.arg(root.path()).env("PATH", "");
    let output = run_with_stdin(cmd, doc);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("MD_FILTERS_MMDC"), "stderr: {}", stderr);
}
