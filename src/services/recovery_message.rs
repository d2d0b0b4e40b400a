use uuid::Uuid;

const RECOVERY_BASE_URL: &str = "https://gamedevs.vercel.app/recover";

/// Rendered bodies of the password recovery email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryMessage {
    pub html: String,
    pub text: String,
}

pub fn recovery_link(user_id: Uuid, token: &str) -> String {
    format!("{}/{}/{}", RECOVERY_BASE_URL, user_id, token)
}

/// Builds the Portuguese HTML and plain-text recovery bodies.
pub fn recovery_password_message(name: &str, user_id: Uuid, token: &str) -> RecoveryMessage {
    let link = recovery_link(user_id, token);

    let html = format!(
        "<h4>Olá {name},</h4>\n<p>Você solicitou o e-mail de recuperação de senha. \
         Clique <a href=\"{link}\">aqui</a> e siga as instruções para acessar o sistema.</p>"
    );
    let text = format!(
        "Olá {name}, \nVocê solicitou o e-mail de recuperação de senha. \
         Clique no link abaixo e siga as instruções para acessar o sistema. \n{link}."
    );

    RecoveryMessage { html, text }
}
