pub mod ai;
pub mod config;
pub mod dork;
pub mod engine;
pub mod export;
pub mod grammar;
pub mod optimizer;
pub mod parser;
pub mod permutator;
pub mod templates;
pub mod testing;
pub mod translator;
pub mod validator;

pub use ai::{
    create_generator, detect_hallucination, AiConfig, AiError, AiProvider, DorkGenerator,
    GenerationContext,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use dork::{Dork, DorkError, DorkSource};
pub use engine::{
    CategoryInfo, DorkEngine, DorkFilter, GenerateError, GenerateRequest, TemplateSummary,
};
pub use export::{ExportError, ExportFormat, ExportMetadata};
pub use optimizer::{optimize, DorkOptimizer, OptimizerConfig};
pub use parser::{parse_operators, OperatorMap};
pub use permutator::get_variations;
pub use templates::{
    CategoryFilter, Template, TemplateCategory, TemplateError, TemplateLoader, TemplateRepository,
};
pub use translator::{
    supported_engines, translate, translate_for, Engine, EngineInfo, TranslateError,
};
pub use validator::{
    check_operator_compatibility, detect_common_errors, explain, validate_dork, validate_syntax,
    ValidationError,
};
