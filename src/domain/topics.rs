/// Skill areas covered by the self-assessment form, in prompt order.
///
/// Order is load-bearing: it defines the prompt sequence and the column
/// order of persisted rows, and must not change once a store file exists.
pub const TOPICS: [&str; 19] = [
    "Linux",
    "Kubernetes On Premise",
    "Docker",
    "Grafana",
    "Prometheus",
    "CI/CD (Geral)",
    "ArgoCD",
    "Git",
    "Jenkins",
    "GitHub Actions",
    "GitLab",
    "Terraform",
    "Amazon ECS",
    "AWS Fargate",
    "AWS CloudFormation",
    "Azure DevOps",
    "ELK",
    "Fluentd",
    "Graylog",
];

/// Legend explaining what each rating value means, shown with every
/// topic prompt and in /help.
pub const SCALE_TEXT: &str = "0 - Nunca usei, 1 - Sei o que é, mas nunca pratiquei, 2 - Já testei, mas não sei configurar sozinho, 3 - Consigo configurar com ajuda de tutoriais, 4 - Consigo configurar e ajudar outros, 5 - Especialista, já implementei do zero";
