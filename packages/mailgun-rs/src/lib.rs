// https://documentation.mailgun.com/docs/mailgun/api-reference/openapi-final/tag/Mailing-Lists/

use std::collections::HashMap;

pub mod models;
use reqwest::Client;

use crate::models::{ListResponse, MemberResponse, MessageResponse};

#[derive(Debug, Clone)]
pub struct MailgunOptions {
    pub api_key: String,
    /// API root, normally "https://api.mailgun.net/v3".
    pub api_base: String,
    /// Domain new lists are created under, e.g. "lists.example.com".
    pub list_domain: String,
}

#[derive(Debug, Clone)]
pub struct MailgunService {
    options: MailgunOptions,
}

impl MailgunService {
    pub fn new(options: MailgunOptions) -> Self {
        Self { options }
    }

    /// Create a mailing list. Returns the address Mailgun assigned to it.
    pub async fn create_list(
        &self,
        name: &str,
        description: &str,
    ) -> Result<String, &'static str> {
        let url = format!("{}/lists", self.options.api_base);
        let address = format!("{}@{}", name, self.options.list_domain);

        let mut form_body: HashMap<&str, String> = HashMap::new();
        form_body.insert("address", address);
        form_body.insert("name", name.to_string());
        form_body.insert("description", description.to_string());

        let client = Client::new();
        let res = client
            .post(url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailgun error ({}): {}", status, error_body);
                    return Err("Mailgun returned an error");
                }

                let result = response.json::<ListResponse>().await;
                match result {
                    Ok(data) => Ok(data.list.address),
                    Err(e) => {
                        eprintln!("Failed to parse Mailgun response: {}", e);
                        Err("Error parsing list response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Mailgun failed: {}", e);
                Err("Error creating list")
            }
        }
    }

    /// Update list metadata. Only the provided fields are sent.
    pub async fn update_list(
        &self,
        list_address: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), &'static str> {
        let url = format!("{}/lists/{}", self.options.api_base, list_address);

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        if let Some(name) = name {
            form_body.insert("name", name);
        }
        if let Some(description) = description {
            form_body.insert("description", description);
        }

        let client = Client::new();
        let res = client
            .put(url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailgun error ({}): {}", status, error_body);
                    return Err("Mailgun returned an error");
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Request to Mailgun failed: {}", e);
                Err("Error updating list")
            }
        }
    }

    /// Delete a mailing list.
    pub async fn delete_list(&self, list_address: &str) -> Result<(), &'static str> {
        let url = format!("{}/lists/{}", self.options.api_base, list_address);

        let client = Client::new();
        let res = client
            .delete(url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailgun error ({}): {}", status, error_body);
                    return Err("Mailgun returned an error");
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Request to Mailgun failed: {}", e);
                Err("Error deleting list")
            }
        }
    }

    /// Add a member to a list. Upserts so re-adding is safe.
    pub async fn add_member(
        &self,
        list_address: &str,
        email: &str,
        display_name: &str,
    ) -> Result<(), &'static str> {
        let url = format!("{}/lists/{}/members", self.options.api_base, list_address);

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("address", email);
        form_body.insert("name", display_name);
        form_body.insert("subscribed", "yes");
        form_body.insert("upsert", "yes");

        let client = Client::new();
        let res = client
            .post(url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailgun error ({}): {}", status, error_body);
                    return Err("Mailgun returned an error");
                }

                match response.json::<MemberResponse>().await {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        eprintln!("Failed to parse Mailgun response: {}", e);
                        Err("Error parsing member response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Mailgun failed: {}", e);
                Err("Error adding member")
            }
        }
    }

    /// Remove a member from a list.
    pub async fn remove_member(
        &self,
        list_address: &str,
        email: &str,
    ) -> Result<(), &'static str> {
        let url = format!(
            "{}/lists/{}/members/{}",
            self.options.api_base, list_address, email
        );

        let client = Client::new();
        let res = client
            .delete(url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailgun error ({}): {}", status, error_body);
                    return Err("Mailgun returned an error");
                }
                Ok(())
            }
            Err(e) => {
                eprintln!("Request to Mailgun failed: {}", e);
                Err("Error removing member")
            }
        }
    }

    /// Send a message to every subscribed member of a list.
    ///
    /// Mailgun fans the message out itself; the list address is both the
    /// recipient and the from/reply address members see.
    pub async fn send_message(
        &self,
        list_address: &str,
        from_name: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), &'static str> {
        let domain = match list_address.split('@').nth(1) {
            Some(domain) => domain,
            None => return Err("List address has no domain"),
        };
        let url = format!("{}/{}/messages", self.options.api_base, domain);
        let from = format!("{} <{}>", from_name, list_address);

        let mut form_body: HashMap<&str, &str> = HashMap::new();
        form_body.insert("from", &from);
        form_body.insert("to", list_address);
        form_body.insert("subject", subject);
        form_body.insert("text", text);
        form_body.insert("html", html);

        let client = Client::new();
        let res = client
            .post(url)
            .basic_auth("api", Some(self.options.api_key.clone()))
            .form(&form_body)
            .send()
            .await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Mailgun error ({}): {}", status, error_body);
                    return Err("Mailgun returned an error");
                }

                match response.json::<MessageResponse>().await {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        eprintln!("Failed to parse Mailgun response: {}", e);
                        Err("Error parsing message response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Mailgun failed: {}", e);
                Err("Error sending message")
            }
        }
    }
}
