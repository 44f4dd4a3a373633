use chrono::NaiveDate;
use htmlescape::encode_minimal as escape;
use lettre::message::{Mailbox, MultiPart, SinglePart, header};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::{info, instrument};

use realty_config::EmailConfig;
use realty_core::AppError;
use realty_models::ContactRequest;

use crate::metrics::track_email_sent;

/// Details of a site visit used by the booking emails.
#[derive(Debug, Clone)]
pub struct BookingEmail<'a> {
    pub property_title: &'a str,
    pub property_location: &'a str,
    pub visit_date: NaiveDate,
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub user_phone: &'a str,
    pub message: Option<&'a str>,
}

pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    #[instrument(skip(self))]
    pub async fn send_welcome_email(&self, to_email: &str, to_name: &str) -> Result<(), AppError> {
        let html_body = self.layout(
            "Welcome aboard",
            "#2563EB",
            &format!(
                r#"<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Hi <strong>{}</strong>,</p>
<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Your account is ready. You can now list properties, save searches and book site visits.</p>
<p style="margin: 0; color: #666666; font-size: 16px; line-height: 1.5;"><a href="{}" style="color: #2563EB;">Start browsing listings</a></p>"#,
                escape(to_name),
                escape(&self.config.frontend_url)
            ),
        );
        let text_body = format!(
            "Hi {},\n\n\
             Your account is ready. You can now list properties, save searches and book site visits.\n\n\
             {}\n\n\
             Best regards,\n\
             {}",
            to_name, self.config.frontend_url, self.config.from_name
        );

        self.send_email("welcome", to_email, None, "Welcome!", &text_body, &html_body)
            .await
    }

    #[instrument(skip(self, reset_token))]
    pub async fn send_password_reset_email(
        &self,
        to_email: &str,
        to_name: &str,
        reset_token: &str,
        expires_in_minutes: i64,
    ) -> Result<(), AppError> {
        let reset_link = self.reset_link(reset_token);

        let html_body = self.layout(
            "Password Reset Request",
            "#2563EB",
            &format!(
                r#"<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Hi <strong>{name}</strong>,</p>
<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">We received a request to reset your password. Click the button below to choose a new one:</p>
<table width="100%" cellpadding="0" cellspacing="0" style="margin: 30px 0;">
    <tr>
        <td align="center">
            <a href="{link}" style="display: inline-block; padding: 14px 40px; background-color: #2563EB; color: #ffffff; text-decoration: none; border-radius: 6px; font-size: 16px; font-weight: bold;">Reset Password</a>
        </td>
    </tr>
</table>
<p style="margin: 0 0 10px 0; color: #666666; font-size: 14px; line-height: 1.5;">Or copy and paste this link into your browser:</p>
<p style="margin: 0 0 20px 0; color: #2563EB; font-size: 14px; word-break: break-all;">{link}</p>
<p style="margin: 0 0 20px 0; color: #666666; font-size: 14px; line-height: 1.5;"><strong>This link will expire in {minutes} minutes.</strong></p>
<p style="margin: 0; color: #666666; font-size: 14px; line-height: 1.5;">If you didn't request this, you can safely ignore this email.</p>"#,
                name = escape(to_name),
                link = escape(&reset_link),
                minutes = expires_in_minutes
            ),
        );
        let text_body = format!(
            "Hi {},\n\n\
             You requested to reset your password.\n\n\
             Open the link below to choose a new password:\n\
             {}\n\n\
             This link will expire in {} minutes.\n\n\
             If you didn't request this, please ignore this email.\n\n\
             Best regards,\n\
             {}",
            to_name, reset_link, expires_in_minutes, self.config.from_name
        );

        self.send_email(
            "password_reset",
            to_email,
            None,
            "Password Reset Request",
            &text_body,
            &html_body,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn send_password_reset_confirmation(
        &self,
        to_email: &str,
        to_name: &str,
    ) -> Result<(), AppError> {
        let html_body = self.layout(
            "Password Reset Successful",
            "#10B981",
            &format!(
                r#"<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Hi <strong>{}</strong>,</p>
<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Your password has been successfully reset. You can now log in with your new password.</p>
<div style="background-color: #FEF3C7; border-left: 4px solid #F59E0B; padding: 15px; margin: 20px 0;">
    <p style="margin: 0; color: #92400E; font-size: 14px; line-height: 1.5;"><strong>Security Notice:</strong> If you didn't make this change, please contact support immediately.</p>
</div>"#,
                escape(to_name)
            ),
        );
        let text_body = format!(
            "Hi {},\n\n\
             Your password has been successfully reset.\n\n\
             If you didn't make this change, please contact support immediately.\n\n\
             Best regards,\n\
             {}",
            to_name, self.config.from_name
        );

        self.send_email(
            "password_reset_confirmation",
            to_email,
            None,
            "Password Reset Successful",
            &text_body,
            &html_body,
        )
        .await
    }

    /// Forwards a contact form submission to the team inbox. Replies go to
    /// the sender.
    #[instrument(skip(self, request), fields(from = %request.email))]
    pub async fn send_contact_notification(&self, request: &ContactRequest) -> Result<(), AppError> {
        let phone = request.phone.as_deref().unwrap_or("Not provided");
        let property = request
            .property_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "Not specified".to_string());

        let html_body = self.layout(
            "New Contact Form Submission",
            "#2563EB",
            &format!(
                r#"<table width="100%" cellpadding="6" cellspacing="0" style="color: #333333; font-size: 15px;">
    <tr><td><strong>Name</strong></td><td>{}</td></tr>
    <tr><td><strong>Email</strong></td><td>{}</td></tr>
    <tr><td><strong>Phone</strong></td><td>{}</td></tr>
    <tr><td><strong>Subject</strong></td><td>{}</td></tr>
    <tr><td><strong>Property</strong></td><td>{}</td></tr>
</table>
<div style="background-color: #f8f9fa; border-left: 4px solid #2563EB; padding: 15px; margin: 20px 0; white-space: pre-wrap; color: #333333;">{}</div>"#,
                escape(&request.name),
                escape(&request.email),
                escape(phone),
                escape(request.subject_or_default()),
                escape(&property),
                escape(&request.message)
            ),
        );
        let text_body = format!(
            "New contact form submission\n\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Subject: {}\n\
             Property: {}\n\n\
             {}",
            request.name,
            request.email,
            phone,
            request.subject_or_default(),
            property,
            request.message
        );

        let subject = format!("Contact form: {}", request.subject_or_default());
        self.send_email(
            "contact_notification",
            &self.config.contact_inbox,
            Some(&request.email),
            &subject,
            &text_body,
            &html_body,
        )
        .await
    }

    #[instrument(skip(self, request), fields(to = %request.email))]
    pub async fn send_contact_acknowledgement(
        &self,
        request: &ContactRequest,
    ) -> Result<(), AppError> {
        let html_body = self.layout(
            "We received your message",
            "#10B981",
            &format!(
                r#"<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Hi <strong>{}</strong>,</p>
<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Thanks for reaching out. Our team will get back to you shortly.</p>
<div style="background-color: #f8f9fa; border-left: 4px solid #10B981; padding: 15px; margin: 20px 0; white-space: pre-wrap; color: #333333;">{}</div>"#,
                escape(&request.name),
                escape(&request.message)
            ),
        );
        let text_body = format!(
            "Hi {},\n\n\
             Thanks for reaching out. Our team will get back to you shortly.\n\n\
             Your message:\n{}\n\n\
             Best regards,\n\
             {}",
            request.name, request.message, self.config.from_name
        );

        self.send_email(
            "contact_acknowledgement",
            &request.email,
            None,
            "We received your message",
            &text_body,
            &html_body,
        )
        .await
    }

    /// Tells the listing contact that a visit was requested.
    #[instrument(skip(self, booking), fields(property = booking.property_title))]
    pub async fn send_booking_notification(
        &self,
        to_email: &str,
        booking: &BookingEmail<'_>,
    ) -> Result<(), AppError> {
        let message = booking.message.unwrap_or("No message");

        let html_body = self.layout(
            "New Site Visit Request",
            "#2563EB",
            &format!(
                r#"<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">A visit was requested for <strong>{}</strong> ({}).</p>
<table width="100%" cellpadding="6" cellspacing="0" style="color: #333333; font-size: 15px;">
    <tr><td><strong>Visit date</strong></td><td>{}</td></tr>
    <tr><td><strong>Name</strong></td><td>{}</td></tr>
    <tr><td><strong>Email</strong></td><td>{}</td></tr>
    <tr><td><strong>Phone</strong></td><td>{}</td></tr>
</table>
<div style="background-color: #f8f9fa; border-left: 4px solid #2563EB; padding: 15px; margin: 20px 0; white-space: pre-wrap; color: #333333;">{}</div>"#,
                escape(booking.property_title),
                escape(booking.property_location),
                booking.visit_date.format("%d %b %Y"),
                escape(booking.user_name),
                escape(booking.user_email),
                escape(booking.user_phone),
                escape(message)
            ),
        );
        let text_body = format!(
            "A visit was requested for {} ({}).\n\n\
             Visit date: {}\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\n\
             {}",
            booking.property_title,
            booking.property_location,
            booking.visit_date.format("%d %b %Y"),
            booking.user_name,
            booking.user_email,
            booking.user_phone,
            message
        );

        self.send_email(
            "booking_notification",
            to_email,
            Some(booking.user_email),
            &format!("Site visit request: {}", booking.property_title),
            &text_body,
            &html_body,
        )
        .await
    }

    #[instrument(skip(self, booking), fields(property = booking.property_title))]
    pub async fn send_booking_confirmation(&self, booking: &BookingEmail<'_>) -> Result<(), AppError> {
        let html_body = self.layout(
            "Visit Request Sent",
            "#10B981",
            &format!(
                r#"<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Hi <strong>{}</strong>,</p>
<p style="margin: 0 0 20px 0; color: #666666; font-size: 16px; line-height: 1.5;">Your request to visit <strong>{}</strong> ({}) on <strong>{}</strong> has been sent. The owner will contact you to confirm.</p>"#,
                escape(booking.user_name),
                escape(booking.property_title),
                escape(booking.property_location),
                booking.visit_date.format("%d %b %Y")
            ),
        );
        let text_body = format!(
            "Hi {},\n\n\
             Your request to visit {} ({}) on {} has been sent. The owner will contact you to confirm.\n\n\
             Best regards,\n\
             {}",
            booking.user_name,
            booking.property_title,
            booking.property_location,
            booking.visit_date.format("%d %b %Y"),
            self.config.from_name
        );

        self.send_email(
            "booking_confirmation",
            booking.user_email,
            None,
            "Your site visit request",
            &text_body,
            &html_body,
        )
        .await
    }

    fn reset_link(&self, token: &str) -> String {
        format!(
            "{}/reset-password?token={}",
            self.config.frontend_url.trim_end_matches('/'),
            token
        )
    }

    #[instrument(skip(self, html_body, text_body))]
    async fn send_email(
        &self,
        template: &'static str,
        to_email: &str,
        reply_to: Option<&str>,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        if !self.config.enabled {
            info!(template, to = %to_email, subject, "SMTP disabled, email not sent");
            return Ok(());
        }

        let result = self
            .deliver(to_email, reply_to, subject, text_body, html_body)
            .await;
        track_email_sent(template, result.is_ok());
        result
    }

    async fn deliver(
        &self,
        to_email: &str,
        reply_to: Option<&str>,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), AppError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        let mut builder = Message::builder()
            .from(
                from.parse()
                    .map_err(|e| AppError::internal_error(format!("Invalid from email: {}", e)))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid to email: {}", e)))?)
            .subject(subject);

        if let Some(reply_to) = reply_to {
            let mailbox: Mailbox = reply_to
                .parse()
                .map_err(|e| AppError::internal_error(format!("Invalid reply-to email: {}", e)))?;
            builder = builder.reply_to(mailbox);
        }

        let email = builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| AppError::internal_error(format!("Failed to build email: {}", e)))?;

        let mailer = if self.config.smtp_username.is_empty() {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
                .port(self.config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(
                self.config.smtp_username.clone(),
                self.config.smtp_password.clone(),
            );

            SmtpTransport::relay(&self.config.smtp_host)
                .map_err(|e| {
                    AppError::internal_error(format!("Failed to create SMTP relay: {}", e))
                })?
                .port(self.config.smtp_port)
                .credentials(creds)
                .build()
        };

        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::internal_error(format!("Task join error: {}", e)))?
            .map_err(|e| AppError::internal_error(format!("Failed to send email: {}", e)))?;

        Ok(())
    }

    /// Wraps `content` in the shared email layout. `content` must already be
    /// escaped.
    fn layout(&self, title: &str, accent: &str, content: &str) -> String {
        let brand = escape(&self.config.from_name);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f4f4f4;">
    <table width="100%" cellpadding="0" cellspacing="0" style="background-color: #f4f4f4; padding: 20px;">
        <tr>
            <td align="center">
                <table width="600" cellpadding="0" cellspacing="0" style="background-color: #ffffff; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 4px rgba(0,0,0,0.1);">
                    <tr>
                        <td style="background-color: {accent}; padding: 30px; text-align: center;">
                            <h1 style="margin: 0; color: #ffffff; font-size: 28px;">{brand}</h1>
                        </td>
                    </tr>
                    <tr>
                        <td style="padding: 40px 30px;">
                            <h2 style="margin: 0 0 20px 0; color: #333333; font-size: 24px;">{title}</h2>
                            {content}
                        </td>
                    </tr>
                    <tr>
                        <td style="background-color: #f8f9fa; padding: 20px 30px; text-align: center; border-top: 1px solid #e9ecef;">
                            <p style="margin: 0; color: #999999; font-size: 12px;">
                                This is an automated email from {brand}.
                            </p>
                        </td>
                    </tr>
                </table>
            </td>
        </tr>
    </table>
</body>
</html>"#,
            title = title,
            accent = accent,
            brand = brand,
            content = content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool) -> EmailConfig {
        EmailConfig {
            enabled,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: "noreply@example.com".to_string(),
            from_name: "Real Estate Team".to_string(),
            contact_inbox: "team@example.com".to_string(),
            frontend_url: "https://app.example/".to_string(),
        }
    }

    #[test]
    fn reset_link_uses_frontend_url() {
        let service = EmailService::new(config(false));
        assert_eq!(
            service.reset_link("abc123"),
            "https://app.example/reset-password?token=abc123"
        );
    }

    #[test]
    fn layout_wraps_content_with_brand() {
        let service = EmailService::new(config(false));
        let html = service.layout("Hello", "#000000", "<p>body</p>");
        assert!(html.contains("<h1 style=\"margin: 0; color: #ffffff; font-size: 28px;\">Real Estate Team</h1>"));
        assert!(html.contains("<p>body</p>"));
    }

    #[tokio::test]
    async fn disabled_transport_drops_messages() {
        let service = EmailService::new(config(false));
        let request = ContactRequest {
            name: "<script>alert(1)</script>".to_string(),
            email: "visitor@example.com".to_string(),
            phone: None,
            subject: None,
            message: "Hello".to_string(),
            property_id: None,
        };

        assert!(service.send_contact_notification(&request).await.is_ok());
        assert!(service.send_contact_acknowledgement(&request).await.is_ok());
        assert!(
            service
                .send_password_reset_email("a@example.com", "A", "token", 60)
                .await
                .is_ok()
        );
    }

    #[test]
    fn user_text_is_escaped() {
        assert_eq!(escape("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
    }
}
