use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn scriptum() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scriptum"));
    cmd.env_remove("SCRIPTUM_LOG");
    cmd
}

fn run(args: &[&str]) -> Output {
    scriptum()
        .args(args)
        .output()
        .expect("failed to spawn scriptum")
}

fn stdout_line(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim_end().to_string()
}

#[cfg(unix)]
fn make_private(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).unwrap();
}

#[cfg(not(unix))]
fn make_private(_path: &Path) {}

#[test]
fn cifrar_and_descifrar_text() {
    let out = run(&["cifrar", "ATAQUE AL AMANECER", "CLAVE"]);
    assert!(out.status.success(), "cifrar failed: {out:?}");
    assert_eq!(stdout_line(&out), "CEALYGLLVQCYEXIT");

    let out = run(&["descifrar", "CEALYGLLVQCYEXIT", "CLAVE"]);
    assert!(out.status.success(), "descifrar failed: {out:?}");
    assert_eq!(stdout_line(&out), "ATAQUEALAMANECER");
}

#[test]
fn english_aliases_work() {
    let out = run(&["encrypt", "hola mundo", "lemon"]);
    assert!(out.status.success());
    assert_eq!(stdout_line(&out), "SSXOZFRPC");
}

#[test]
fn text_and_key_may_start_with_a_hyphen() {
    let out = run(&["cifrar", "-hola mundo", "lemon"]);
    assert_eq!(out.status.code(), Some(0), "{out:?}");
    assert_eq!(stdout_line(&out), "SSXOZFRPC");

    let out = run(&["cifrar", "--- ataque ---", "CLAVE"]);
    assert_eq!(out.status.code(), Some(0), "{out:?}");
    assert_eq!(stdout_line(&out), "CEALYG");

    let out = run(&["descifrar", "-SSXOZFRPC", "LEMON"]);
    assert_eq!(stdout_line(&out), "HOLAMUNDO");

    // A hyphenated key reaches the validator instead of the argument parser.
    let out = run(&["cifrar", "HOLA", "-CLAVE"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("invalid characters"));
}

#[test]
fn verbs_are_accepted_in_uppercase() {
    let out = run(&["CIFRAR", "ATAQUE AL AMANECER", "CLAVE"]);
    assert!(out.status.success(), "{out:?}");
    assert_eq!(stdout_line(&out), "CEALYGLLVQCYEXIT");

    let out = run(&["Descifrar", "CEALYGLLVQCYEXIT", "CLAVE"]);
    assert!(out.status.success(), "{out:?}");
    assert_eq!(stdout_line(&out), "ATAQUEALAMANECER");
}

#[test]
fn text_from_stdin() {
    let mut child = scriptum()
        .args(["cifrar", "-", "CLAVE"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn scriptum");
    {
        let mut stdin = child.stdin.take().expect("failed to open stdin");
        writeln!(stdin, "Ataque al\namanecer").expect("failed to write text");
    }
    let out = child.wait_with_output().expect("failed to wait on scriptum");
    assert!(out.status.success());
    assert_eq!(stdout_line(&out), "CEALYGLLVQCYEXIT");
}

#[test]
fn validation_error_exits_nonzero_with_message() {
    let out = run(&["cifrar", "HOLA", "AB12CD"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid characters"), "stderr: {stderr}");
    assert!(stderr.contains("ABCD"), "stderr: {stderr}");
}

#[test]
fn malformed_invocation_prints_usage() {
    let out = run(&["cifrar"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");

    let out = run(&["rot13", "HOLA"]);
    assert!(!out.status.success());
}

#[test]
fn file_roundtrip_through_binary() {
    let dir = tempdir().unwrap();
    let plain = dir.path().join("mensaje.txt");
    let cipher = dir.path().join("mensaje_cifrado.txt");
    let back = dir.path().join("mensaje_descifrado.txt");
    fs::write(&plain, "Este es un mensaje secreto para probar el cifrado Vigenere.").unwrap();

    let out = scriptum()
        .arg("cifrar-archivo")
        .arg(&plain)
        .arg(&cipher)
        .arg("CLAVE")
        .output()
        .unwrap();
    assert!(out.status.success(), "cifrar-archivo failed: {out:?}");
    assert_eq!(
        fs::read_to_string(&cipher).unwrap(),
        "GDTZIUFNHIPDAEIUPCMIVZPVVCARJFCCEGGKQRVHQGIBIPPRZ"
    );

    let out = scriptum()
        .arg("descifrar-archivo")
        .arg(&cipher)
        .arg(&back)
        .arg("CLAVE")
        .output()
        .unwrap();
    assert!(out.status.success(), "descifrar-archivo failed: {out:?}");
    assert_eq!(
        fs::read_to_string(&back).unwrap(),
        "ESTEESUNMENSAJESECRETOPARAPROBARELCIFRADOVIGENERE"
    );

    // A second run without --force refuses to clobber the output.
    let out = scriptum()
        .arg("descifrar-archivo")
        .arg(&cipher)
        .arg(&back)
        .arg("CLAVE")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("refusing to overwrite"));
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().unwrap();
    let out = scriptum()
        .arg("cifrar-archivo")
        .arg(dir.path().join("nope.txt"))
        .arg(dir.path().join("out.txt"))
        .arg("CLAVE")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn key_from_keyfile() {
    let dir = tempdir().unwrap();
    let keyfile = dir.path().join("clave.key");
    fs::write(&keyfile, "CLAVE\n").unwrap();
    make_private(&keyfile);

    let out = scriptum()
        .args(["cifrar", "--keyfile"])
        .arg(&keyfile)
        .arg("ATAQUE AL AMANECER")
        .output()
        .unwrap();
    assert!(out.status.success(), "keyfile run failed: {out:?}");
    assert_eq!(stdout_line(&out), "CEALYGLLVQCYEXIT");
}

#[cfg(unix)]
#[test]
fn world_readable_keyfile_is_refused() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let keyfile = dir.path().join("clave.key");
    fs::write(&keyfile, "CLAVE").unwrap();
    fs::set_permissions(&keyfile, fs::Permissions::from_mode(0o644)).unwrap();

    let out = scriptum()
        .args(["cifrar", "--keyfile"])
        .arg(&keyfile)
        .arg("HOLA")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("world-readable"));
}

#[test]
fn config_file_tightens_key_policy() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("scriptum.toml");
    fs::write(&config, "[validator]\nmin_key_len = 6\n").unwrap();

    let out = scriptum()
        .arg("--config")
        .arg(&config)
        .args(["cifrar", "HOLA", "CLAVE"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("at least 6 letters"));
}

#[test]
fn demo_writes_sample_files() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");

    for _ in 0..2 {
        let out = scriptum()
            .arg("demo")
            .arg("--data-dir")
            .arg(&data)
            .output()
            .unwrap();
        assert!(out.status.success(), "demo failed: {out:?}");
        let stdout = String::from_utf8_lossy(&out.stdout);
        assert!(stdout.contains("CEALYGLLVQCYEXIT"), "stdout: {stdout}");
    }

    assert!(data.join("mensaje.txt").is_file());
    assert_eq!(
        fs::read_to_string(data.join("mensaje_descifrado.txt")).unwrap(),
        "ESTEESUNMENSAJESECRETOPARAPROBARELCIFRADOVIGENERE"
    );
}
