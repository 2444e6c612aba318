//! Additional monthly gains attached to a submission

use serde::{Deserialize, Serialize};

/// A named extra monthly gain entered next to the calculated savings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalGain {
    pub id: String,
    pub name: String,
    pub value: f64,
}

impl AdditionalGain {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value,
        }
    }

    /// Only named, positive gains count towards totals
    pub fn counts(&self) -> bool {
        !self.name.trim().is_empty() && self.value > 0.0
    }
}

const STANDARD_GAINS: [&str; 13] = [
    "Custo dos Funcionários para realizar a calibragem em todos os pneus",
    "Custo do Tempo dos veículos parados no patio/posto para calibrar",
    "Custo para consertar os Veículos acidentados",
    "Valor da reposiçao dos veiculos incendiados e indenizaçao das cargas",
    "Valor dos gastos medicos e hospitalares em caso de acidente",
    "Despesas por indenizaçao pelo Danos Ambientais causados",
    "Redução de desperdício de combustível",
    "Valor da reposiçao de Roubos e Desvios de Pneus",
    "Valor da Redução de Pessoal com Gestão de Pneus",
    "Controle e eficiencia na Gestao do Recapeamento",
    "Controle da Gestão de Descarte",
    "Controle da localizaçao de cada pneu indicando se esta em um veiculo, no estoque, na borracharia ou na recauchutadora",
    "Obter estatisticas de qual tipo/marca de pneu tem melhor rendimento e custo beneficio de cada rota",
];

/// The standard line items, all zeroed
pub fn default_additional_gains() -> Vec<AdditionalGain> {
    STANDARD_GAINS
        .iter()
        .enumerate()
        .map(|(i, name)| AdditionalGain::new((i + 1).to_string(), *name, 0.0))
        .collect()
}

/// Sum of the gains that count (named and positive)
pub fn total_additional_gains(gains: &[AdditionalGain]) -> f64 {
    gains.iter().filter(|g| g.counts()).map(|g| g.value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zeroed() {
        let gains = default_additional_gains();
        assert_eq!(gains.len(), 13);
        assert_eq!(gains[0].id, "1");
        assert_eq!(gains[12].id, "13");
        assert_eq!(total_additional_gains(&gains), 0.0);
    }

    #[test]
    fn test_total_skips_unnamed_and_non_positive() {
        let gains = vec![
            AdditionalGain::new("1", "Calibragem", 150.0),
            AdditionalGain::new("2", "   ", 999.0),
            AdditionalGain::new("3", "Descarte", -20.0),
            AdditionalGain::new("4", "Roubos", 50.5),
        ];
        assert!((total_additional_gains(&gains) - 200.5).abs() < 1e-9);
    }
}
