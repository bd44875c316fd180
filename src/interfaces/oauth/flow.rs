//! Interactive installed-application authorization
//!
//! The user visits the provider's consent page. The resulting code is
//! either captured by a one-shot local webserver (the redirect target) or,
//! with `--noauth_local_webserver`, pasted into the terminal.

use std::collections::HashMap;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};

use rand::distributions::Alphanumeric;
use rand::Rng;
use url::Url;

use super::{AuthError, ClientSecret, Credentials, TokenClient};
use crate::constants::defaults;
use crate::helpers;

const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";
const STATE_LEN: usize = 24;

const SUCCESS_PAGE: &str = "<html><head><title>Authentication Status</title></head>\
<body><p>The authentication flow has completed.</p></body></html>";
const FAILURE_PAGE: &str = "<html><head><title>Authentication Status</title></head>\
<body><p>The authentication flow has failed.</p></body></html>";

pub trait AuthorizationFlow {
    /// Obtain a new credential for `scope` with the user's consent
    fn authorize(&self, secret: &ClientSecret, scope: &str) -> Result<Credentials, AuthError>;
}

/// Command-line switches controlling how the authorization code is received
#[derive(Clone, Debug, PartialEq)]
pub struct FlowOptions {
    pub auth_host_name: String,
    pub auth_host_ports: Vec<u16>,
    pub noauth_local_webserver: bool,
}

impl Default for FlowOptions {
    fn default() -> Self {
        FlowOptions {
            auth_host_name: defaults::AUTH_HOST_NAME.to_string(),
            auth_host_ports: defaults::AUTH_HOST_PORTS.to_vec(),
            noauth_local_webserver: false,
        }
    }
}

pub struct InstalledAppFlow {
    options: FlowOptions,
    tokens: TokenClient,
    open_browser: fn(&str) -> bool,
}

impl InstalledAppFlow {
    pub fn new(options: FlowOptions, tokens: TokenClient) -> Self {
        InstalledAppFlow {
            options,
            tokens,
            open_browser: helpers::open_browser,
        }
    }

    /// Replace the desktop browser launcher
    pub fn with_browser(mut self, open_browser: fn(&str) -> bool) -> Self {
        self.open_browser = open_browser;
        self
    }

    fn bind_callback_listener(&self) -> Option<(TcpListener, String)> {
        if self.options.noauth_local_webserver {
            return None;
        }
        let host = &self.options.auth_host_name;
        for &port in &self.options.auth_host_ports {
            match TcpListener::bind((host.as_str(), port)) {
                Ok(listener) => {
                    let port = listener.local_addr().map(|a| a.port()).unwrap_or(port);
                    return Some((listener, format!("http://{host}:{port}/")));
                }
                Err(e) => log::debug!("Cannot listen on {}:{}: {}", host, port, e),
            }
        }

        let ports: Vec<String> = self
            .options
            .auth_host_ports
            .iter()
            .map(u16::to_string)
            .collect();
        println!(
            "Failed to start a local webserver listening on port(s) {}.\n\
             Please check your firewall settings and locally running programs that\n\
             may be blocking or using those ports.\n\n\
             Falling back to --noauth_local_webserver and continuing with authorization.\n",
            ports.join(", ")
        );
        None
    }
}

impl AuthorizationFlow for InstalledAppFlow {
    fn authorize(&self, secret: &ClientSecret, scope: &str) -> Result<Credentials, AuthError> {
        let state = random_state();

        let (code, redirect_uri) = match self.bind_callback_listener() {
            Some((listener, redirect_uri)) => {
                let url = authorization_url(secret, scope, &redirect_uri, &state)?;
                (self.open_browser)(url.as_str());
                println!("Your browser has been opened to visit:\n\n    {url}\n");
                println!(
                    "If your browser is on a different machine then exit and re-run this\n\
                     application with the command-line parameter\n\n  --noauth_local_webserver\n"
                );
                (receive_code(&listener, &state)?, redirect_uri)
            }
            None => {
                let url = authorization_url(secret, scope, OOB_REDIRECT_URI, &state)?;
                println!("Go to the following link in your browser:\n\n    {url}\n");
                print!("Enter verification code: ");
                io::stdout().flush()?;
                (read_code(&mut io::stdin().lock())?, OOB_REDIRECT_URI.to_string())
            }
        };

        let credentials = self
            .tokens
            .exchange_code(secret, &code, &redirect_uri, scope)?;
        println!("Authentication successful.");
        Ok(credentials)
    }
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LEN)
        .map(char::from)
        .collect()
}

pub(crate) fn authorization_url(
    secret: &ClientSecret,
    scope: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<Url, AuthError> {
    let mut url = Url::parse(&secret.auth_uri)?;
    url.query_pairs_mut()
        .append_pair("client_id", &secret.client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("scope", scope)
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("state", state);
    Ok(url)
}

/// Serve redirect requests until one carries a code or an error
pub(crate) fn receive_code(listener: &TcpListener, state: &str) -> Result<String, AuthError> {
    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                log::debug!("Failed to accept callback connection: {}", e);
                continue;
            }
        };
        let params = match read_callback_params(&stream) {
            Ok(params) => params,
            Err(e) => {
                log::debug!("Ignoring malformed callback request: {}", e);
                respond(&mut stream, "400 Bad Request", FAILURE_PAGE);
                continue;
            }
        };

        if let Some(error) = params.get("error") {
            respond(&mut stream, "200 OK", FAILURE_PAGE);
            return Err(AuthError::Denied(error.clone()));
        }
        if let Some(code) = params.get("code") {
            if params.get("state").map(String::as_str) != Some(state) {
                respond(&mut stream, "400 Bad Request", FAILURE_PAGE);
                return Err(AuthError::Callback("state parameter mismatch".into()));
            }
            respond(&mut stream, "200 OK", SUCCESS_PAGE);
            return Ok(code.clone());
        }
        // Browsers also ask for /favicon.ico and the like
        respond(&mut stream, "404 Not Found", "");
    }
    Err(AuthError::Callback("callback listener closed".into()))
}

fn read_callback_params(stream: &TcpStream) -> Result<HashMap<String, String>, AuthError> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    // Drain headers so the client sees a clean response
    let mut header = String::new();
    while reader.read_line(&mut header)? > 0 && header.trim_end() != "" {
        header.clear();
    }

    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| AuthError::Callback(format!("bad request line '{}'", request_line.trim_end())))?;
    let url = Url::parse("http://localhost/")?.join(target)?;
    Ok(url.query_pairs().into_owned().collect())
}

fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(e) = stream.write_all(response.as_bytes()) {
        log::debug!("Could not answer callback request: {}", e);
    }
}

fn read_code(input: &mut impl BufRead) -> Result<String, AuthError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let code = line.trim();
    if code.is_empty() {
        return Err(AuthError::Denied("no verification code entered".into()));
    }
    Ok(code.to_string())
}
