//! Wifi association and webhook reporting
//!
//! The CYW43439 joins the configured network on demand; readiness is the
//! DHCP configuration coming up. A report is one plain HTTP GET against
//! the substituted URL template.

use cyw43::{Control, JoinOptions};
use defmt::*;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_net::Stack;
use reqwless::client::HttpClient;
use reqwless::request::Method;

use hygrochron_core::reading::Reading;
use hygrochron_core::traits::{CloudError, CloudLink, StatusCode};
use hygrochron_drivers::webhook;

/// One TCP socket, sized for a short GET and its response
const TCP_BUFFER: usize = 1024;

pub struct WebhookLink {
    control: Control<'static>,
    stack: Stack<'static>,
    ssid: &'static str,
    password: &'static str,
    url_template: &'static str,
}

impl WebhookLink {
    pub fn new(
        control: Control<'static>,
        stack: Stack<'static>,
        ssid: &'static str,
        password: &'static str,
        url_template: &'static str,
    ) -> Self {
        Self {
            control,
            stack,
            ssid,
            password,
            url_template,
        }
    }
}

impl CloudLink for WebhookLink {
    async fn start_association(&mut self) -> Result<(), CloudError> {
        if self.stack.is_config_up() {
            return Ok(());
        }
        info!("joining '{}'", self.ssid);
        self.control
            .join(self.ssid, JoinOptions::new(self.password.as_bytes()))
            .await
            .map_err(|err| {
                warn!("join failed with status {}", err.status);
                CloudError::Transport
            })
    }

    async fn poll_associated(&mut self) -> bool {
        self.stack.is_config_up()
    }

    async fn report(&mut self, reading: &Reading) -> Result<StatusCode, CloudError> {
        if !self.stack.is_config_up() {
            return Err(CloudError::NotAssociated);
        }
        let url = webhook::format_url(self.url_template, reading).ok_or(CloudError::Transport)?;
        info!("HTTP GET -> {}", url.as_str());

        let client_state = TcpClientState::<1, TCP_BUFFER, TCP_BUFFER>::new();
        let tcp_client = TcpClient::new(self.stack, &client_state);
        let dns_client = DnsSocket::new(self.stack);
        let mut http_client = HttpClient::new(&tcp_client, &dns_client);

        let mut rx_buffer = [0; TCP_BUFFER];
        let mut request = http_client
            .request(Method::GET, url.as_str())
            .await
            .map_err(|_| CloudError::Dns)?;
        let response = request
            .send(&mut rx_buffer)
            .await
            .map_err(|_| CloudError::Transport)?;

        Ok(StatusCode(response.status as u16))
    }
}
