#![allow(dead_code)]

use create_native_module::command::{CommandRunner, CommandSpec};
use create_native_module::config::{Config, FileConfig};
use create_native_module::error::{Error, Result};
use create_native_module::prompt::{Prompter, Question};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use url::Url;

/// Answers questions from a fixed table; unknown questions take their default.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: HashMap<&'static str, String>,
    /// Answer for every confirmation; `None` simulates an interrupted prompt
    pub confirm: Option<bool>,
    pub asked: RefCell<Vec<&'static str>>,
    pub confirmations: RefCell<usize>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self { confirm: Some(true), ..Default::default() }
    }

    pub fn answer(mut self, key: &'static str, value: &str) -> Self {
        self.answers.insert(key, value.to_string());
        self
    }

    pub fn confirming(mut self, confirm: Option<bool>) -> Self {
        self.confirm = confirm;
        self
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, question: &Question) -> Result<String> {
        self.asked.borrow_mut().push(question.key);
        let answer = self.answers.get(question.key).cloned().unwrap_or(question.default.clone());
        if let Some(validate) = question.validate {
            validate(&answer).map_err(Error::ValidationError)?;
        }
        Ok(answer)
    }

    fn confirm(&self, _message: &str, _default: bool) -> Result<bool> {
        *self.confirmations.borrow_mut() += 1;
        self.confirm.ok_or(Error::Cancelled)
    }
}

/// Records commands instead of running them.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: RefCell<Vec<CommandSpec>>,
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &CommandSpec) -> Result<()> {
        self.commands.borrow_mut().push(command.clone());
        Ok(())
    }
}

pub fn test_config(base_dir: &Path) -> Config {
    Config::from_sources(FileConfig::default(), |_| None, base_dir.to_path_buf()).unwrap()
}

pub fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// A small module template with manifest, nested package dir and docs.
pub fn create_template(root: &Path) {
    write(
        root,
        "$package.json",
        "{\n  \"name\": \"{{ project.slug }}\",\n  \"version\": \"{{ project.version }}\",\n  \"author\": \"{{ author }}\"\n}\n",
    );
    write(root, "${project.package}/index.ts", "export const name = '{{ project.name }}'; // {{ project.package }}\n");
    write(root, "README.md", "# {{ project.name }}\n");
    write(root, "CHANGELOG.md", "## {{ project.version }}\n");
    write(root, "package.json", "{\"name\": \"template-itself\"}\n");
    write(root, "node_modules/dep/index.js", "module.exports = {};\n");
    write(root, "android/build/output.txt", "stale\n");
    write(root, ".DS_Store", "junk");
}

pub const TEMPLATE_PACKAGE: &str = "native-module-template";
pub const TARBALL_PATH: &str = "native-module-template/-/native-module-template-1.0.0.tgz";

/// Packs `root` into a gzipped tarball with every entry under `wrapper/`.
pub fn pack_template(root: &Path, wrapper: &str) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(wrapper, root).unwrap();
    builder.into_inner().unwrap().finish().unwrap()
}

/// Starts a registry on a loopback port serving the metadata of
/// `native-module-template` (latest = 1.0.0) and its tarball.
/// Each response is held back by `delay`. Returns the registry URL.
pub fn serve_registry(tarball: Vec<u8>, delay: Duration) -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let registry = Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
    let metadata = format!(
        r#"{{"name": "{TEMPLATE_PACKAGE}", "dist-tags": {{"latest": "1.0.0"}}, "versions": {{"1.0.0": {{"dist": {{"tarball": "{}"}}}}}}}}"#,
        registry.join(TARBALL_PATH).unwrap()
    );
    let routes: Vec<(String, Vec<u8>)> = vec![
        (format!("/{TEMPLATE_PACKAGE}"), metadata.into_bytes()),
        (format!("/{TARBALL_PATH}"), tarball),
    ];

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { break };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            if reader.read_line(&mut request_line).is_err() {
                continue;
            }
            loop {
                let mut header = String::new();
                match reader.read_line(&mut header) {
                    Ok(0) | Err(_) => break,
                    Ok(_) if header == "\r\n" => break,
                    Ok(_) => {}
                }
            }

            thread::sleep(delay);
            let path = request_line.split_whitespace().nth(1).unwrap_or("/");
            let response = match routes.iter().find(|(route, _)| route == path) {
                Some((_, body)) => {
                    let mut response = format!(
                        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                        body.len()
                    )
                    .into_bytes();
                    response.extend_from_slice(body);
                    response
                }
                None => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                    .to_vec(),
            };
            let _ = stream.write_all(&response);
            let _ = stream.flush();
        }
    });

    registry
}
