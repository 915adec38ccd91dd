use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::process::{Command, Stdio};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_entity-stream"));
    cmd.env_remove("RUST_LOG").env_remove("PORT").env_remove("HOST");
    cmd
}

#[test]
fn test_serve_exits_with_bind_code_when_port_taken() {
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port().to_string();

    let output = bin()
        .args(["serve", "--host", "127.0.0.1", "--port", &port])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&port), "stderr: {}", stderr);
}

#[test]
fn test_serve_rejects_bad_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    std::io::Write::write_all(&mut file, b"[server]\nmax_message_chars = 0\n").unwrap();

    let output = bin()
        .args(["serve", "--config"])
        .arg(file.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
}

#[cfg(unix)]
#[test]
fn test_serve_stops_cleanly_on_sigterm() {
    let mut child = bin()
        .args(["serve", "--host", "127.0.0.1", "--port", "0"])
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let stderr = child.stderr.take().unwrap();
    let mut lines = BufReader::new(stderr).lines();
    loop {
        match lines.next() {
            Some(Ok(line)) if line.contains("Listening on") => break,
            Some(Ok(_)) => continue,
            other => panic!("Server exited before listening: {:?}", other),
        }
    }

    let killed = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(killed.success());

    let status = child.wait().unwrap();
    assert!(status.success(), "exit status: {:?}", status);

    let rest: Vec<String> = lines.map_while(|l| l.ok()).collect();
    assert!(rest.iter().any(|l| l.contains("Server stopped")));
}
