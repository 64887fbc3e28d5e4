use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::normalize::normalize_term;
use super::types::{AnalysisError, UrgencyLevel};

// ---------------------------------------------------------------------------
// Registry entries
// ---------------------------------------------------------------------------

/// A disease entry in the registry. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Disease {
    pub id: String,
    pub display_name: String,
    /// Alternate spellings, stored normalized; always includes `id`.
    pub aliases: Vec<String>,
    pub base_urgency: UrgencyLevel,
    pub canonical_symptoms: Vec<String>,
    pub description: String,
    pub treatment_text: String,
    pub prevention_text: String,
    /// Person-to-person transmissible; adds the isolation addendum to
    /// treatment answers.
    #[serde(default)]
    pub transmissible: bool,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// A symptom category: a human label plus the normalized keywords that
/// map into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomCategory {
    pub id: String,
    /// Human-readable label surfaced to callers.
    pub label: String,
    pub keywords: Vec<String>,
}

/// On-disk registry shape: `{ "diseases": [...], "categories": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeConfig {
    pub diseases: Vec<Disease>,
    pub categories: Vec<SymptomCategory>,
}

// ---------------------------------------------------------------------------
// KnowledgeBase
// ---------------------------------------------------------------------------

/// Immutable disease/symptom registry. Built once at startup and shared
/// across requests without locking; nothing here mutates after
/// construction.
pub struct KnowledgeBase {
    diseases: Vec<Disease>,
    categories: Vec<SymptomCategory>,
}

impl KnowledgeBase {
    /// Build from a parsed configuration. Aliases and keywords are
    /// normalized here so lookups compare like with like, and every
    /// disease gains its own id as an alias.
    pub fn new(config: KnowledgeConfig) -> Self {
        let diseases = config
            .diseases
            .into_iter()
            .map(|mut d| {
                let mut aliases: Vec<String> =
                    d.aliases.iter().map(|a| normalize_term(a)).collect();
                let id_alias = normalize_term(&d.id);
                if !aliases.contains(&id_alias) {
                    aliases.push(id_alias);
                }
                let mut seen = HashSet::new();
                aliases.retain(|a| !a.is_empty() && seen.insert(a.clone()));
                d.aliases = aliases;
                d
            })
            .collect();

        let categories = config
            .categories
            .into_iter()
            .map(|mut c| {
                c.keywords = c
                    .keywords
                    .iter()
                    .map(|k| normalize_term(k))
                    .filter(|k| !k.is_empty())
                    .collect();
                c
            })
            .collect();

        Self {
            diseases,
            categories,
        }
    }

    /// Load a registry from a JSON file, replacing the built-in one.
    pub fn load(path: &Path) -> Result<Self, AnalysisError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::KnowledgeLoad(path.display().to_string(), e.to_string())
        })?;
        let config: KnowledgeConfig = serde_json::from_str(&raw).map_err(|e| {
            AnalysisError::KnowledgeParse(path.display().to_string(), e.to_string())
        })?;
        Ok(Self::new(config))
    }

    pub fn diseases(&self) -> &[Disease] {
        &self.diseases
    }

    pub fn categories(&self) -> &[SymptomCategory] {
        &self.categories
    }

    /// Look up a disease by id.
    pub fn disease(&self, id: &str) -> Option<&Disease> {
        self.diseases.iter().find(|d| d.id == id)
    }

    /// Look up the human label for a symptom category.
    pub fn category_label(&self, category_id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.label.as_str())
    }

    /// Built-in Spanish respiratory registry.
    pub fn respiratory() -> Self {
        Self::new(respiratory_config())
    }
}

// ---------------------------------------------------------------------------
// Built-in respiratory registry
// ---------------------------------------------------------------------------

fn disease(
    id: &str,
    display_name: &str,
    aliases: &[&str],
    base_urgency: UrgencyLevel,
    canonical_symptoms: &[&str],
    description: &str,
    treatment_text: &str,
    prevention_text: &str,
    transmissible: bool,
    recommendations: &[&str],
) -> Disease {
    Disease {
        id: id.to_string(),
        display_name: display_name.to_string(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
        base_urgency,
        canonical_symptoms: canonical_symptoms.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
        treatment_text: treatment_text.to_string(),
        prevention_text: prevention_text.to_string(),
        transmissible,
        recommendations: recommendations.iter().map(|s| s.to_string()).collect(),
    }
}

fn category(id: &str, label: &str, keywords: &[&str]) -> SymptomCategory {
    SymptomCategory {
        id: id.to_string(),
        label: label.to_string(),
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
    }
}

fn respiratory_config() -> KnowledgeConfig {
    KnowledgeConfig {
        diseases: vec![
            disease(
                "asma",
                "Asma",
                &["asma", "asma bronquial"],
                UrgencyLevel::Medium,
                &[
                    "tos seca",
                    "sibilancias al respirar",
                    "dificultad para respirar",
                    "opresión en el pecho",
                ],
                "El asma es una enfermedad crónica que inflama y estrecha las vías \
                 respiratorias, provocando episodios de tos, silbidos en el pecho y \
                 falta de aire. Suele aparecer por brotes desencadenados por alérgenos, \
                 ejercicio o aire frío.",
                "El asma se controla con inhaladores: broncodilatadores de rescate para \
                 las crisis y corticoides inhalados como tratamiento de mantenimiento. \
                 La pauta exacta debe ajustarla un profesional de salud.",
                "Identifica y evita tus desencadenantes (polvo, polen, humo de tabaco), \
                 sigue el tratamiento de mantenimiento aunque no tengas síntomas y \
                 vacúnate frente a la gripe cada año.",
                false,
                &[
                    "Lleva siempre contigo tu inhalador de rescate",
                    "Evita el humo de tabaco y los ambientes con polvo",
                    "Acude a revisión si necesitas el inhalador más de dos veces por semana",
                ],
            ),
            disease(
                "neumonia",
                "Neumonía",
                &["neumonia", "pulmonia"],
                UrgencyLevel::High,
                &[
                    "fiebre alta",
                    "tos con flema",
                    "dolor en el pecho al respirar",
                    "escalofríos",
                    "dificultad para respirar",
                ],
                "La neumonía es una infección que inflama los sacos de aire de uno o \
                 ambos pulmones, que pueden llenarse de líquido. Puede ser causada por \
                 bacterias, virus u hongos y su gravedad varía de leve a potencialmente \
                 mortal.",
                "La neumonía bacteriana se trata con antibióticos pautados por un \
                 médico; la vírica se maneja con reposo, hidratación y antitérmicos. \
                 Los casos graves requieren ingreso hospitalario.",
                "Vacúnate frente al neumococo y la gripe, lávate las manos con \
                 frecuencia y no fumes: el tabaco daña las defensas naturales del \
                 pulmón.",
                false,
                &[
                    "No interrumpas el antibiótico aunque te encuentres mejor",
                    "Guarda reposo y bebe líquidos en abundancia",
                    "Vuelve a consultar si la fiebre no cede en 48 horas",
                ],
            ),
            disease(
                "covid-19",
                "COVID-19",
                &["covid-19", "covid", "coronavirus", "sars-cov-2"],
                UrgencyLevel::High,
                &[
                    "fiebre",
                    "tos seca",
                    "cansancio",
                    "pérdida del olfato o del gusto",
                    "dificultad para respirar",
                ],
                "La COVID-19 es una enfermedad infecciosa causada por el coronavirus \
                 SARS-CoV-2. La mayoría de los casos cursan de forma leve, pero puede \
                 producir neumonía y complicaciones graves, sobre todo en personas \
                 mayores o con enfermedades previas.",
                "No existe un tratamiento curativo único: los casos leves se manejan \
                 con reposo, hidratación y antitérmicos. En pacientes de riesgo el \
                 médico puede valorar antivirales específicos.",
                "Mantén la pauta de vacunación al día, ventila los espacios cerrados, \
                 lávate las manos con frecuencia y usa mascarilla si tienes síntomas \
                 respiratorios.",
                true,
                &[
                    "Aíslate mientras tengas síntomas para no contagiar",
                    "Controla tu temperatura y tu saturación si dispones de pulsioxímetro",
                    "Busca atención médica si notas falta de aire en reposo",
                ],
            ),
            disease(
                "gripe",
                "Gripe",
                &["gripe", "influenza", "gripa"],
                UrgencyLevel::Medium,
                &[
                    "fiebre",
                    "dolor muscular",
                    "dolor de cabeza",
                    "tos seca",
                    "cansancio intenso",
                ],
                "La gripe es una infección vírica estacional causada por el virus \
                 influenza. Comienza de forma brusca con fiebre, dolores musculares y \
                 malestar general, y suele resolverse sola en una o dos semanas.",
                "El tratamiento es sintomático: reposo, líquidos y antitérmicos. Los \
                 antivirales solo se valoran en personas de riesgo y dentro de las \
                 primeras 48 horas de síntomas.",
                "La vacunación anual es la medida más eficaz. Lávate las manos con \
                 frecuencia y evita el contacto cercano con personas enfermas durante \
                 la temporada de gripe.",
                true,
                &[
                    "Guarda reposo en casa mientras tengas fiebre",
                    "Bebe líquidos con frecuencia",
                    "Evita el contacto con personas mayores o inmunodeprimidas",
                ],
            ),
            disease(
                "bronquitis",
                "Bronquitis",
                &["bronquitis", "bronquitis aguda"],
                UrgencyLevel::Medium,
                &[
                    "tos persistente con flema",
                    "molestias en el pecho",
                    "fatiga",
                    "febrícula",
                ],
                "La bronquitis aguda es la inflamación de los bronquios, casi siempre \
                 de origen vírico tras un catarro o una gripe. Su síntoma principal es \
                 una tos persistente que puede durar varias semanas.",
                "Suele resolverse sola: reposo, hidratación y antitérmicos si hay \
                 fiebre. Los antibióticos no son útiles en la bronquitis vírica y solo \
                 un médico debe valorar su necesidad.",
                "No fumes y evita el humo ambiental, lávate las manos con frecuencia y \
                 vacúnate frente a la gripe para reducir las infecciones que la \
                 desencadenan.",
                false,
                &[
                    "Evita el tabaco y los irritantes mientras dure la tos",
                    "Usa un humidificador o inhala vapor para aliviar la tos",
                ],
            ),
            disease(
                "resfriado_comun",
                "Resfriado común",
                &["resfriado comun", "resfriado", "resfrio", "catarro"],
                UrgencyLevel::Low,
                &[
                    "congestión nasal",
                    "estornudos",
                    "dolor de garganta",
                    "tos leve",
                ],
                "El resfriado común es una infección vírica leve de la nariz y la \
                 garganta. Es muy frecuente, se contagia con facilidad y se resuelve \
                 solo en unos días sin tratamiento específico.",
                "No tiene tratamiento curativo: descansa, hidrátate y usa analgésicos \
                 suaves o lavados nasales para aliviar los síntomas mientras dura.",
                "Lávate las manos con frecuencia, evita tocarte la cara y mantén \
                 distancia de las personas acatarradas, sobre todo en invierno.",
                true,
                &[
                    "Descansa y mantén una buena hidratación",
                    "Usa lavados nasales con suero para la congestión",
                ],
            ),
            disease(
                "tuberculosis",
                "Tuberculosis",
                &["tuberculosis"],
                UrgencyLevel::High,
                &[
                    "tos persistente de más de tres semanas",
                    "tos con sangre",
                    "sudores nocturnos",
                    "pérdida de peso",
                    "fiebre",
                ],
                "La tuberculosis es una infección bacteriana grave que afecta sobre \
                 todo a los pulmones. Progresa lentamente y requiere tratamiento \
                 prolongado; sin él puede ser mortal y contagiar a convivientes.",
                "Se trata con una combinación de antibióticos específicos durante \
                 al menos seis meses, siempre bajo supervisión médica estrecha. \
                 Abandonar el tratamiento genera resistencias.",
                "Evita el contacto prolongado en espacios cerrados con personas con \
                 tuberculosis activa; los convivientes de un caso deben hacerse las \
                 pruebas de detección.",
                true,
                &[
                    "Completa el tratamiento íntegro aunque desaparezcan los síntomas",
                    "Ventila las habitaciones compartidas a diario",
                    "Asegura el estudio de contactos convivientes",
                ],
            ),
        ],
        categories: vec![
            category(
                "tos",
                "tos",
                &["tos", "tos seca", "tos con flema", "expectoracion", "tos con sangre"],
            ),
            category(
                "fiebre",
                "fiebre",
                &[
                    "fiebre",
                    "fiebre alta",
                    "calentura",
                    "temperatura alta",
                    "escalofrios",
                ],
            ),
            category(
                "dificultad_respiratoria",
                "dificultad respiratoria",
                &[
                    "dificultad respiratoria",
                    "dificultad para respirar",
                    "falta de aire",
                    "ahogo",
                    "no puedo respirar",
                    "me falta el aire",
                ],
            ),
            category(
                "dolor",
                "dolor",
                &[
                    "dolor en el pecho",
                    "dolor de cabeza",
                    "dolor de garganta",
                    "dolor muscular",
                ],
            ),
            category(
                "congestion",
                "congestión nasal",
                &[
                    "congestion nasal",
                    "nariz tapada",
                    "mocos",
                    "secrecion nasal",
                    "estornudos",
                ],
            ),
            category(
                "fatiga",
                "fatiga",
                &["cansancio", "fatiga", "debilidad", "agotamiento"],
            ),
        ],
    }
}
