//! Static command surface: fixed texts and link keyboards. Stateless, all
//! gated by the dispatcher before they are ever built.

use crate::domain::topics::SCALE_TEXT;
use crate::infrastructure::telegram::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, SendMessageRequest,
};

const WELCOME_TEXT: &str = "📢 Bem-vindo(a) ao Grupo de Estudos DEVOPS! 🚀

Este é um espaço criado para pessoas que querem evoluir juntas no mundo DevOps.
Aqui, acreditamos que ninguém sabe tudo, mas todos têm algo a ensinar.

Nosso objetivo é compartilhar conhecimento, trocar experiências e construir habilidades práticas em:
Linux, Docker, Kubernetes, CI/CD, Monitoração, Cloud e muito mais.

🔍 Como funciona:

Cada integrante vai preencher um breve formulário para mapearmos o nível de conhecimento em diferentes ferramentas e tecnologias.

Com base nesse mapeamento, criaremos um plano de estudos quinzenal, onde a cada encontro um dos integrantes ministrará um treinamento prático para o grupo.

Nosso foco é mão na massa: aprender praticando, errando juntos e evoluindo em comunidade.

💡 Por que isso é importante?
O mundo DevOps é colaborativo por natureza. Times de alta performance não surgem do nada — eles são construídos com base em aprendizado contínuo, troca de ideias e desafios compartilhados.

✨ Aqui, sua participação importa!
Mesmo que esteja começando agora, sua curiosidade e dedicação farão diferença.
Se já tem experiência, sua visão ajudará outros a crescerem mais rápido.

📆 Primeiro passo:
Preencha o formulário de autoavaliação e venha para nossa primeira reunião.
Vamos juntos transformar curiosidade em conhecimento e conhecimento em resultados.

🚀 Bora codar, automatizar e subir juntos para a nuvem!

Comandos:
/form - formulário de autoavaliação (Nome, E-mail e notas 0-5 por tópico)
/material - links de estudo
/certifications - trilhas e certificações
/help - ajuda e contato

Estamos começando nossa aventura no mundo DevOps! 💻⚙️
A ideia aqui é simples: um ajuda o outro e todo mundo cresce junto.

Cada dúvida que você tiver pode ser a mesma dúvida de outra pessoa.
Cada dica que você souber pode salvar horas de trabalho de alguém.
E cada desafio que aparecer vai ser uma chance de aprender algo novo.

Aqui não tem “eu sei mais” ou “eu sei menos”, tem time unido.
Então bora compartilhar, testar, errar, acertar e, acima de tudo, evoluir juntos.

💬 Pergunte, compartilhe, ajude, provoque ideias… o DevOps é sobre colaboração!";

const MENTION_HINT: &str = "Oi! Use /help para ver o que eu sei fazer aqui no grupo. 😉";

pub fn welcome(chat_id: i64) -> SendMessageRequest {
    SendMessageRequest::new(chat_id, WELCOME_TEXT).without_preview()
}

pub fn help(chat_id: i64) -> SendMessageRequest {
    let text = format!(
        "🛠 *Ajuda*\n/start - boas-vindas\n/form - formulário (Nome, E-mail e notas 0-5 por tópico)\n/material - materiais e docs\n/certifications - certificações sugeridas\n\nEscala: {}",
        SCALE_TEXT
    );
    SendMessageRequest::new(chat_id, text).markdown()
}

pub fn material(chat_id: i64) -> SendMessageRequest {
    let keyboard = InlineKeyboardMarkup::single_column(vec![
        InlineKeyboardButton::url("📚 Roadmap DevOps", "https://roadmap.sh/devops"),
        InlineKeyboardButton::url("🐳 Docker Docs", "https://docs.docker.com/"),
        InlineKeyboardButton::url("☸️ Kubernetes Docs", "https://kubernetes.io/docs/"),
        InlineKeyboardButton::url("📈 Grafana Docs", "https://grafana.com/docs/"),
        InlineKeyboardButton::url(
            "📊 Prometheus Docs",
            "https://prometheus.io/docs/introduction/overview/",
        ),
        InlineKeyboardButton::url("🧪 GitHub Actions", "https://docs.github.com/actions"),
        InlineKeyboardButton::url("🧰 GitLab CI", "https://docs.gitlab.com/ee/ci/"),
        InlineKeyboardButton::url("⚙️ Jenkins", "https://www.jenkins.io/doc/"),
        InlineKeyboardButton::url("🌩 Terraform", "https://developer.hashicorp.com/terraform/docs"),
        InlineKeyboardButton::url("🔎 ELK", "https://www.elastic.co/what-is/elk-stack"),
    ]);
    SendMessageRequest::new(chat_id, "Materiais recomendados:").with_keyboard(keyboard)
}

pub fn certifications(chat_id: i64) -> SendMessageRequest {
    let keyboard = InlineKeyboardMarkup::single_column(vec![
        InlineKeyboardButton::url(
            "AWS Cloud Practitioner",
            "https://aws.amazon.com/certification/certified-cloud-practitioner/",
        ),
        InlineKeyboardButton::url(
            "CKA (Kubernetes Admin)",
            "https://training.linuxfoundation.org/certification/certified-kubernetes-administrator-cka/",
        ),
        InlineKeyboardButton::url(
            "Terraform Associate",
            "https://www.hashicorp.com/certification/terraform-associate",
        ),
        InlineKeyboardButton::url(
            "Azure Fundamentals (AZ-900)",
            "https://learn.microsoft.com/certifications/azure-fundamentals/",
        ),
        InlineKeyboardButton::url(
            "GitLab Certifications",
            "https://about.gitlab.com/learn/certifications/",
        ),
        InlineKeyboardButton::url("Grafana Training", "https://grafana.com/training/"),
    ]);
    SendMessageRequest::new(chat_id, "Trilhas e certificações sugeridas:").with_keyboard(keyboard)
}

pub fn mention_hint(chat_id: i64) -> SendMessageRequest {
    SendMessageRequest::new(chat_id, MENTION_HINT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_is_plain_with_preview_disabled() {
        let request = welcome(1);
        assert!(request.text.contains("Bem-vindo(a) ao Grupo de Estudos DEVOPS"));
        assert!(request.text.contains("/form - formulário de autoavaliação"));
        assert_eq!(request.disable_web_page_preview, Some(true));
        assert!(request.parse_mode.is_none());
    }

    #[test]
    fn test_help_lists_commands_and_scale() {
        let request = help(1);
        assert!(request.text.starts_with("🛠 *Ajuda*"));
        assert!(request.text.contains("/certifications"));
        assert!(request.text.contains(SCALE_TEXT));
        assert_eq!(request.parse_mode, Some("Markdown"));
    }

    #[test]
    fn test_material_keyboard_has_ten_links() {
        let request = material(1);
        let keyboard = request.reply_markup.unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 10);
        assert_eq!(keyboard.inline_keyboard[0][0].text, "📚 Roadmap DevOps");
        assert_eq!(
            keyboard.inline_keyboard[0][0].url,
            "https://roadmap.sh/devops"
        );
    }

    #[test]
    fn test_certifications_keyboard_has_six_links() {
        let request = certifications(1);
        let keyboard = request.reply_markup.unwrap();
        assert_eq!(keyboard.inline_keyboard.len(), 6);
        assert_eq!(
            keyboard.inline_keyboard[5][0].url,
            "https://grafana.com/training/"
        );
    }
}
