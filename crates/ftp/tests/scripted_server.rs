//! Drives `FtpClient` against a small in-process FTP server.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use slugshare_ftp::{
    FtpConnector, FtpEndpoint, FtpError, TcpFtpConnector, change_dir_creating,
};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

#[derive(Default)]
struct ServerState {
    dirs: HashSet<String>,
    files: HashMap<String, Vec<u8>>,
    commands: Vec<String>,
}

fn join(cwd: &str, name: &str) -> String {
    if name.starts_with('/') {
        name.to_string()
    } else if cwd == "/" {
        format!("/{name}")
    } else {
        format!("{cwd}/{name}")
    }
}

async fn reply(stream: &mut TcpStream, line: &str) {
    stream.write_all(format!("{line}\r\n").as_bytes()).await.unwrap();
}

/// Handles one control connection until QUIT or EOF.
async fn serve_control(mut stream: TcpStream, state: Arc<Mutex<ServerState>>) {
    reply(&mut stream, "220 scripted server ready").await;

    let mut cwd = String::from("/");
    let mut user = String::new();
    let mut logged_in = false;
    let mut pasv: Option<TcpListener> = None;

    loop {
        let mut line = String::new();
        {
            let mut reader = BufReader::new(&mut stream);
            // The client waits for each reply, so nothing is left buffered.
            if reader.read_line(&mut line).await.unwrap_or(0) == 0 {
                return;
            }
        }
        let line = line.trim_end().to_string();
        state.lock().unwrap().commands.push(line.clone());
        let (cmd, arg) = line.split_once(' ').unwrap_or((line.as_str(), ""));

        match cmd {
            "USER" => {
                user = arg.to_string();
                reply(&mut stream, "331 password required").await;
            }
            "PASS" => {
                if user == "slug" && arg == "secret" {
                    logged_in = true;
                    reply(&mut stream, "230 logged in").await;
                } else {
                    reply(&mut stream, "530 Login incorrect.").await;
                }
            }
            _ if !logged_in && cmd != "QUIT" => {
                reply(&mut stream, "530 not logged in").await;
            }
            "TYPE" => reply(&mut stream, "200 type set").await,
            "CWD" => {
                let target = join(&cwd, arg);
                if state.lock().unwrap().dirs.contains(&target) {
                    cwd = target;
                    reply(&mut stream, "250 directory changed").await;
                } else {
                    reply(&mut stream, "550 no such directory").await;
                }
            }
            "MKD" => {
                let target = join(&cwd, arg);
                state.lock().unwrap().dirs.insert(target.clone());
                reply(&mut stream, &format!("257 \"{target}\" created")).await;
            }
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                let port = listener.local_addr().unwrap().port();
                pasv = Some(listener);
                reply(
                    &mut stream,
                    &format!(
                        "227 Entering Passive Mode (127,0,0,1,{},{})",
                        port / 256,
                        port % 256
                    ),
                )
                .await;
            }
            "STOR" => {
                let Some(listener) = pasv.take() else {
                    reply(&mut stream, "425 use PASV first").await;
                    continue;
                };
                reply(&mut stream, "150 opening data connection").await;
                let (mut data, _) = listener.accept().await.unwrap();
                let mut buf = Vec::new();
                data.read_to_end(&mut buf).await.unwrap();
                state.lock().unwrap().files.insert(join(&cwd, arg), buf);
                reply(&mut stream, "226 transfer complete").await;
            }
            "QUIT" => {
                reply(&mut stream, "221 bye").await;
                return;
            }
            _ => reply(&mut stream, "502 not implemented").await,
        }
    }
}

async fn start_server(existing_dirs: &[&str]) -> (u16, Arc<Mutex<ServerState>>) {
    let state = Arc::new(Mutex::new(ServerState::default()));
    {
        let mut s = state.lock().unwrap();
        s.dirs.insert("/".into());
        for d in existing_dirs {
            s.dirs.insert(d.to_string());
        }
    }
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let st = Arc::clone(&state);
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        serve_control(stream, st).await;
    });
    (port, state)
}

fn endpoint(port: u16, password: &str) -> FtpEndpoint {
    FtpEndpoint::parse("127.0.0.1", &port.to_string(), "slug", password).unwrap()
}

#[tokio::test]
async fn login_navigate_and_upload() {
    let (port, state) = start_server(&["/pub"]).await;
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("app.tgz");
    let sidecar = dir.path().join("app.tgz.md5");
    std::fs::write(&artifact, vec![42u8; 100_000]).unwrap();
    std::fs::write(&sidecar, "d41d8cd98f00b204e9800998ecf8427e").unwrap();

    let ep = endpoint(port, "secret");
    let connector = TcpFtpConnector::default();
    let mut session = connector.connect(&ep).await.unwrap();
    session.login(&ep.user, &ep.password).await.unwrap();

    let reached = change_dir_creating(session.as_mut(), "/pub/apps/v1").await.unwrap();
    assert_eq!(reached, "/pub/apps/v1");

    let sent = session.put_file(&artifact, "app.tgz").await.unwrap();
    assert_eq!(sent, 100_000);
    session.put_file(&sidecar, "app.tgz.md5").await.unwrap();
    session.quit().await.unwrap();

    let s = state.lock().unwrap();
    assert_eq!(s.files["/pub/apps/v1/app.tgz"].len(), 100_000);
    assert_eq!(
        s.files["/pub/apps/v1/app.tgz.md5"],
        b"d41d8cd98f00b204e9800998ecf8427e"
    );
    assert!(s.dirs.contains("/pub/apps"));
    assert!(s.dirs.contains("/pub/apps/v1"));
    assert!(s.commands.contains(&"TYPE I".to_string()));
    assert_eq!(s.commands.last().map(String::as_str), Some("QUIT"));
}

#[tokio::test]
async fn wrong_password_is_login_error() {
    let (port, _state) = start_server(&[]).await;
    let ep = endpoint(port, "wrong");

    let mut session = TcpFtpConnector::default().connect(&ep).await.unwrap();
    let err = session.login(&ep.user, &ep.password).await.unwrap_err();
    assert!(matches!(err, FtpError::Login { code: 530, .. }));
    session.quit().await.unwrap();
}

#[tokio::test]
async fn upload_of_missing_local_file_fails_before_transfer() {
    let (port, state) = start_server(&[]).await;
    let ep = endpoint(port, "secret");

    let mut session = TcpFtpConnector::default().connect(&ep).await.unwrap();
    session.login(&ep.user, &ep.password).await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let err = session
        .put_file(&dir.path().join("missing.tgz"), "missing.tgz")
        .await
        .unwrap_err();
    assert!(matches!(err, FtpError::Io(_)));
    session.quit().await.unwrap();

    assert!(state.lock().unwrap().files.is_empty());
}
