// End-to-end tests: a real control connection, real passive data connections

use crate::config::Config;
use crate::core_network::network::serve;
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};

const CHUNK: usize = 64;

struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl TestClient {
    async fn connect(addr: SocketAddr) -> Self {
        let (reader, writer) = TcpStream::connect(addr).await.unwrap().into_split();
        let mut client = Self {
            reader: BufReader::new(reader),
            writer,
        };
        assert_eq!(client.reply().await, "220 welcome");
        client
    }

    async fn send_raw(&mut self, raw: &str) {
        self.writer.write_all(raw.as_bytes()).await.unwrap();
    }

    async fn send(&mut self, command: &str) {
        self.send_raw(&format!("{}\r\n", command)).await;
    }

    async fn reply(&mut self) -> String {
        let mut line = String::new();
        self.reader.read_line(&mut line).await.unwrap();
        line.trim_end_matches("\r\n").to_string()
    }

    async fn command(&mut self, command: &str) -> String {
        self.send(command).await;
        self.reply().await
    }

    async fn login(&mut self) {
        assert_eq!(self.command("USER anonymous").await, "331 user name anonymous");
        assert_eq!(self.command("PASS guest").await, "230 logged in successfully");
    }

    async fn pasv(&mut self) -> SocketAddr {
        let reply = self.command("PASV").await;
        let inner = reply
            .strip_prefix("227 entering passive mode (")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or_else(|| panic!("unexpected PASV reply: {}", reply));
        let parts: Vec<u8> = inner.split(',').map(|p| p.parse().unwrap()).collect();
        let ip = Ipv4Addr::new(parts[0], parts[1], parts[2], parts[3]);
        let port = u16::from(parts[4]) * 256 + u16::from(parts[5]);
        SocketAddr::from((ip, port))
    }

    async fn store(&mut self, name: &str, contents: &[u8]) {
        let data_addr = self.pasv().await;
        self.send(&format!("STOR {}", name)).await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();
        data.write_all(contents).await.unwrap();
        data.shutdown().await.unwrap();
        drop(data);
        assert_eq!(self.reply().await, "125 data connection open, staring transfer");
        assert_eq!(self.reply().await, "226 file sent successfully");
    }

    async fn retrieve(&mut self, name: &str) -> Vec<u8> {
        let data_addr = self.pasv().await;
        self.send(&format!("RETR {}", name)).await;
        let mut data = TcpStream::connect(data_addr).await.unwrap();
        let mut contents = Vec::new();
        data.read_to_end(&mut contents).await.unwrap();
        assert_eq!(self.reply().await, "150 opening BINARY mode data connection");
        assert_eq!(self.reply().await, "226 file downloaded successfully");
        contents
    }
}

async fn start_test_server(root: &Path) -> SocketAddr {
    let mut config = Config::default();
    config.server.root_dir = Some(root.to_path_buf());
    config.server.upload_buffer_size = Some(CHUNK);
    config.server.download_buffer_size = Some(CHUNK);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, Arc::new(config)));
    addr
}

#[tokio::test]
async fn test_store_then_retrieve_round_trip() {
    let root = tempfile::tempdir().unwrap();
    let addr = start_test_server(root.path()).await;
    let mut client = TestClient::connect(addr).await;
    client.login().await;
    assert_eq!(client.command("TYPE I").await, "200 switched to binary mode");

    let large: Vec<u8> = (0..CHUNK * 10 + 7).map(|i| (i % 251) as u8).collect();
    let cases: [(&str, Vec<u8>); 3] = [
        ("empty.bin", Vec::new()),
        ("one.bin", vec![0x42]),
        ("large.bin", large),
    ];

    for (name, contents) in cases.iter() {
        client.store(name, contents).await;
        assert_eq!(&std::fs::read(root.path().join(name)).unwrap(), contents);
        assert_eq!(
            client.command(&format!("SIZE {}", name)).await,
            format!("213 {}", contents.len())
        );
        assert_eq!(&client.retrieve(name).await, contents, "round trip of {}", name);
    }

    assert_eq!(client.command("QUIT").await, "221 bye");
}

#[tokio::test]
async fn test_retr_without_pasv_and_missing_file() {
    let root = tempfile::tempdir().unwrap();
    let addr = start_test_server(root.path()).await;
    let mut client = TestClient::connect(addr).await;
    client.login().await;

    assert_eq!(client.command("RETR nothing.bin").await, "550 please use PASV mode");
    assert_eq!(
        client.command("STOR nothing.bin").await,
        "550 please use PASV instead of PORT"
    );

    let data_addr = client.pasv().await;
    client.send("RETR nothing.bin").await;
    let _data = TcpStream::connect(data_addr).await.unwrap();
    assert_eq!(client.reply().await, "550 failed to download file");
}

#[tokio::test]
async fn test_list_and_directory_commands() {
    let root = tempfile::tempdir().unwrap();
    let base = root.path().canonicalize().unwrap();
    let addr = start_test_server(&base).await;
    let mut client = TestClient::connect(addr).await;
    client.login().await;

    assert_eq!(client.command("PWD").await, format!("257 \"{}\"", base.display()));
    assert_eq!(
        client.command("MKD docs").await,
        format!("257 \"{}/docs\" directory created", base.display())
    );
    assert_eq!(client.command("CWD docs").await, "250 directory changed");
    assert_eq!(
        client.command("PWD").await,
        format!("257 \"{}\"", base.join("docs").display())
    );
    client.store("readme.txt", b"read me").await;

    let data_addr = client.pasv().await;
    client.send("LIST").await;
    let mut data = TcpStream::connect(data_addr).await.unwrap();
    let mut listing = String::new();
    data.read_to_string(&mut listing).await.unwrap();
    assert_eq!(client.reply().await, "150 sending directory contents");
    assert_eq!(client.reply().await, "226 directory contents sent");
    assert!(listing.starts_with("-rw"));
    assert!(listing.ends_with(" readme.txt\r\n"));
    assert_eq!(listing.matches("\r\n").count(), 1);

    assert_eq!(client.command("LIST").await, "425 use PASV or PORT first");
    assert_eq!(client.command("DELE readme.txt").await, "250 file was removed");
    assert_eq!(client.command("CWD ..").await, "250 directory changed");
    assert_eq!(client.command("RMD docs").await, "250 directory was removed");
    assert_eq!(client.command("RMD docs").await, "550 error deleting directory");
}

#[tokio::test]
async fn test_protocol_errors_keep_connection_open() {
    let root = tempfile::tempdir().unwrap();
    let addr = start_test_server(root.path()).await;
    let mut client = TestClient::connect(addr).await;

    assert_eq!(client.command("HELP").await, "500 unknown command");
    assert_eq!(client.command("PASS secret").await, "500 Invalid username or password");
    assert_eq!(client.command("USER root").await, "530 invalid username");

    client.send("NOOP").await;
    assert_eq!(client.reply().await, "530 not logged in");
    assert_eq!(client.reply().await, "200 noop");

    client.send_raw("NOOP\n").await;
    assert_eq!(client.reply().await, "500 error processing last command");

    client.login().await;
    assert_eq!(client.command("PORT 127,0,0,1,200,1").await, "502 not implemented");
    assert_eq!(client.command("LIST").await, "502 not implemented");
    assert_eq!(client.command("NOOP").await, "200 noop");
    assert_eq!(client.command("QUIT").await, "221 bye");

    let mut rest = String::new();
    let n = client.reader.read_line(&mut rest).await.unwrap();
    assert_eq!(n, 0, "connection should be closed after QUIT");
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let root = tempfile::tempdir().unwrap();
    let base = root.path().canonicalize().unwrap();
    std::fs::create_dir(base.join("a")).unwrap();
    let addr = start_test_server(&base).await;

    let mut first = TestClient::connect(addr).await;
    let mut second = TestClient::connect(addr).await;
    first.login().await;
    second.login().await;

    assert_eq!(first.command("CWD a").await, "250 directory changed");
    assert_eq!(
        second.command("PWD").await,
        format!("257 \"{}\"", base.display())
    );
    assert_eq!(
        first.command("PWD").await,
        format!("257 \"{}\"", base.join("a").display())
    );
}
