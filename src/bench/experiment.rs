//! Built-in experiment catalog.

use std::path::Path;
use std::str::FromStr;

use crate::core::BenchError;
use crate::provider::{Provider, constants};

use super::prompts::PromptSource;

const CODE_GENERATION_PROMPTS: [&str; 6] = [
    "Crie um código em python que leia um arquivo de texto e conte o número de linhas e palavras.",
    "Crie uma função em TypeScript que valide emails e números de telefone utilizando expressões regulares (regex).",
    "Mostre como configurar a conexão com um banco de dados usando Sequelize em JavaScript.",
    "Crie um código em Python que leia um arquivo CSV e envie os dados para uma API via requisição HTTP.",
    "Crie um middleware de autenticação JWT completo em Node.js (gerar token, verificar e renovar).",
    "Crie uma API REST em Node.js com Express que permita cadastrar, listar e deletar produtos, utilizando Sequelize e MySQL.",
];

const FILE_PROMPT_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Experiment {
    CodeGeneration,
    ErrorAnalysis,
    CodeComprehension,
    Smoke,
}

impl Experiment {
    pub const ALL: [Experiment; 4] = [
        Experiment::CodeGeneration,
        Experiment::ErrorAnalysis,
        Experiment::CodeComprehension,
        Experiment::Smoke,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Experiment::CodeGeneration => "code-generation",
            Experiment::ErrorAnalysis => "error-analysis",
            Experiment::CodeComprehension => "code-comprehension",
            Experiment::Smoke => "smoke",
        }
    }

    /// Results sub-directory, also the prompt sub-directory for file-backed sets.
    pub fn category(&self) -> &'static str {
        match self {
            Experiment::CodeGeneration => "code_generation",
            Experiment::ErrorAnalysis => "error_analysis",
            Experiment::CodeComprehension => "code_comprehension",
            Experiment::Smoke => "smoke",
        }
    }

    pub fn prompt_source(&self, prompts_dir: &Path) -> PromptSource {
        match self {
            Experiment::CodeGeneration => PromptSource::Inline(
                CODE_GENERATION_PROMPTS.iter().map(|p| p.to_string()).collect(),
            ),
            Experiment::ErrorAnalysis | Experiment::CodeComprehension => {
                PromptSource::IndexedFiles {
                    dir: prompts_dir.join(self.category()),
                    stem: "prompt".to_string(),
                    count: FILE_PROMPT_COUNT,
                }
            }
            Experiment::Smoke => PromptSource::Inline(vec!["Hello!".to_string()]),
        }
    }

    /// Like [`prompt_source`](Self::prompt_source), but file-backed sets read
    /// every consecutive prompt file instead of a fixed count.
    pub fn discovered_prompt_source(&self, prompts_dir: &Path) -> PromptSource {
        match self.prompt_source(prompts_dir) {
            PromptSource::IndexedFiles { dir, stem, .. } => PromptSource::Discover { dir, stem },
            inline => inline,
        }
    }

    /// System prompt sent to chat-style providers for this experiment.
    pub fn system_prompt(&self, provider: Provider) -> Option<String> {
        match (provider, self) {
            (Provider::OpenAI, Experiment::CodeGeneration | Experiment::Smoke) => {
                Some(constants::openai::DEFAULT_SYSTEM_PROMPT.to_string())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Experiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Experiment {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('_', "-");
        Experiment::ALL
            .into_iter()
            .find(|e| e.name() == normalized)
            .ok_or_else(|| {
                let known: Vec<&str> = Experiment::ALL.iter().map(|e| e.name()).collect();
                BenchError::Configuration(format!(
                    "Unknown experiment '{s}'. Expected one of: {}",
                    known.join(", ")
                ))
            })
    }
}
