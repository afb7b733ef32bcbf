//! Tipos de Erro do Subsistema Midgard
//!
//! Define erros estruturados para diagnóstico preciso de falhas nas tabelas
//! de tradução.

/// Erros das tabelas de tradução midgard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidgardError {
    /// Pool de nós esgotado (condição fatal, sem reciclagem)
    PoolExhausted,
    /// Região já mapeada cobrindo a base pedida
    DuplicateMapping,
    /// Intervalo malformado (tamanho zero ou overflow de bound)
    InvalidRange,
    /// Tabela vazia, nada a publicar
    EmptyTable,
    /// Estrutura de nó inconsistente (filho ausente em nó interno)
    CorruptedNode,
}

impl MidgardError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PoolExhausted => "Pool de nós midgard esgotado",
            Self::DuplicateMapping => "Região já mapeada na tabela",
            Self::InvalidRange => "Intervalo virtual malformado",
            Self::EmptyTable => "Tabela vazia, nada a publicar",
            Self::CorruptedNode => "Nó da árvore inconsistente",
        }
    }

    /// Erros fatais exigem abortar o contexto dono da tabela.
    /// O pool nunca recicla, então exaustão não tem recuperação; colisão de
    /// endereço sintetizado indica estado interno inconsistente.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::PoolExhausted | Self::DuplicateMapping | Self::CorruptedNode
        )
    }
}

impl core::fmt::Display for MidgardError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tipo Result específico para operações midgard
pub type MidgardResult<T> = Result<T, MidgardError>;
