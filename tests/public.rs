//! Integration tests for the landing page and its contact form.

mod common;

#[cfg(test)]
mod public_tests {
    use super::common::{
        calls_matching, create_test_server, spawn_backend, unreachable_backend, Backend,
    };
    use portfolio::contact::{DUPLICATE_EMAIL, MISSING_CONTACT, NETWORK_FAILED};
    use serde_json::json;

    #[tokio::test]
    async fn test_landing_lists_backend_projects() {
        let mut seed = Backend::default();
        seed.projects.push(json!({
            "_id": "p-9",
            "name": "Loja Aurora",
            "description": "E-commerce de moda",
            "isPreview": true,
            "link": "https://aurora.dev"
        }));
        let (api, _backend) = spawn_backend(seed).await;
        let server = create_test_server(&api);

        let page = server.get("/").await;
        page.assert_status_ok();
        let html = page.text();
        assert!(html.contains(r#"data-id="p-9""#));
        assert!(html.contains("Loja Aurora"));
        assert!(html.contains("<iframe"));
        assert!(!html.contains("Redsun Dashboard"));
    }

    #[tokio::test]
    async fn test_landing_falls_back_when_backend_fails() {
        let (api, _backend) = spawn_backend(Backend::failing_projects()).await;
        let server = create_test_server(&api);

        let html = server.get("/").await.text();
        assert!(html.contains("Redsun Dashboard"));
        assert!(html.contains("Portfolio Visual"));
    }

    #[tokio::test]
    async fn test_landing_falls_back_when_backend_is_down() {
        let server = create_test_server(&unreachable_backend().await);

        let page = server.get("/").await;
        page.assert_status_ok();
        assert!(page.text().contains("Redsun Dashboard"));
    }

    #[tokio::test]
    async fn test_contact_button_shows_sending_state_on_submit() {
        let (api, _backend) = spawn_backend(Backend::default()).await;
        let server = create_test_server(&api);

        let html = server.get("/").await.text();
        assert!(html.contains("textContent='Enviando...'"));
        assert!(html.contains("Enviar mensagem"));
    }

    #[tokio::test]
    async fn test_contact_without_name_never_reaches_backend() {
        let (api, backend) = spawn_backend(Backend::default()).await;
        let server = create_test_server(&api);

        let page = server
            .post("/contact")
            .form(&[("name", "  "), ("email", "ana@site.dev"), ("phone", ""), ("message", "Oi")])
            .await;
        page.assert_status_ok();
        assert!(page.text().contains(MISSING_CONTACT));
        assert!(calls_matching(&backend, "POST", "/api/users").is_empty());
    }

    #[tokio::test]
    async fn test_contact_without_email_or_phone_never_reaches_backend() {
        let (api, backend) = spawn_backend(Backend::default()).await;
        let server = create_test_server(&api);

        let page = server
            .post("/contact")
            .form(&[("name", "Ana"), ("email", ""), ("phone", "abc"), ("message", "Oi")])
            .await;
        let html = page.text();
        assert!(html.contains(MISSING_CONTACT));
        assert!(html.contains(r#"value="Ana""#));
        assert!(calls_matching(&backend, "POST", "/api/users").is_empty());
    }

    #[tokio::test]
    async fn test_contact_success_sends_masked_phone() {
        let (api, backend) = spawn_backend(Backend::default()).await;
        let server = create_test_server(&api);

        let page = server
            .post("/contact")
            .form(&[
                ("name", "Ana"),
                ("email", ""),
                ("phone", "16982217569"),
                ("message", "Preciso de um site"),
            ])
            .await;
        page.assert_status_ok();
        let html = page.text();
        assert!(html.contains("Enviado!"));
        assert!(html.contains("status-success"));

        let calls = calls_matching(&backend, "POST", "/api/users");
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].body,
            Some(json!({
                "name": "Ana",
                "email": "",
                "phone": "(16) 98221-7569",
                "description": "Preciso de um site"
            }))
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_marks_email_field() {
        let (api, _backend) =
            spawn_backend(Backend::with_submissions(&[("sub-1", "respondido")])).await;
        let server = create_test_server(&api);

        let page = server
            .post("/contact")
            .form(&[
                ("name", "Ana"),
                ("email", "sub-1@cliente.com"),
                ("phone", ""),
                ("message", "De novo"),
            ])
            .await;
        let html = page.text();
        assert!(html.contains(DUPLICATE_EMAIL));
        assert!(html.contains("field-error"));
        assert!(html.contains(r#"id="email-error""#));
        assert!(html.contains("status-error"));
    }

    #[tokio::test]
    async fn test_contact_network_failure() {
        let server = create_test_server(&unreachable_backend().await);

        let page = server
            .post("/contact")
            .form(&[("name", "Ana"), ("email", "ana@site.dev"), ("phone", ""), ("message", "Oi")])
            .await;
        page.assert_status_ok();
        let html = page.text();
        assert!(html.contains(NETWORK_FAILED));
        assert!(!html.contains("field-error"));
    }
}
