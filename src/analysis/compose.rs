use super::knowledge::{Disease, KnowledgeBase};
use super::types::{DetectedSymptom, QuestionType, UrgencyLevel};

/// Fixed disclaimer appended to every answer, without exception.
pub const DISCLAIMER: &str = "Importante: esta información es orientativa y no \
sustituye la valoración de un profesional de salud. Ante síntomas graves o \
persistentes, busca atención médica.";

/// Render the final message and recommendation list.
///
/// Template selection is keyed by intent and the primary disease (first
/// detection, when any); `action` answers depend only on urgency. The
/// disclaimer is appended unconditionally.
pub fn compose(
    question_type: QuestionType,
    disease_ids: &[String],
    symptoms: &[DetectedSymptom],
    urgency: UrgencyLevel,
    include_recommendations: bool,
    kb: &KnowledgeBase,
) -> (String, Vec<String>) {
    let primary = disease_ids.first().and_then(|id| kb.disease(id));

    let body = match question_type {
        QuestionType::Definition => ResponseTemplates::definition(primary),
        QuestionType::Symptoms => ResponseTemplates::symptoms(primary, urgency),
        QuestionType::Treatment => ResponseTemplates::treatment(primary),
        QuestionType::Prevention => ResponseTemplates::prevention(primary),
        QuestionType::Action => ResponseTemplates::action(urgency),
        QuestionType::General => ResponseTemplates::general(primary, symptoms, kb),
    };

    let message = format!("{body}\n\n{DISCLAIMER}");

    let recommendations = if include_recommendations {
        build_recommendations(primary, urgency)
    } else {
        Vec::new()
    };

    (message, recommendations)
}

/// Answer templates per intent.
pub struct ResponseTemplates;

impl ResponseTemplates {
    pub fn definition(disease: Option<&Disease>) -> String {
        match disease {
            Some(d) => format!("{}: {}", d.display_name, d.description),
            None => "Puedo explicarte enfermedades respiratorias como el asma, la \
                     gripe, la neumonía o la COVID-19, y orientarte según los \
                     síntomas que describas. Dime qué enfermedad te interesa."
                .to_string(),
        }
    }

    pub fn symptoms(disease: Option<&Disease>, urgency: UrgencyLevel) -> String {
        let mut body = match disease {
            Some(d) => {
                let bullets: String = d
                    .canonical_symptoms
                    .iter()
                    .map(|s| format!("\n- {s}"))
                    .collect();
                format!("Los síntomas habituales de {} incluyen:{}", d.display_name, bullets)
            }
            None => "Para orientarte sobre síntomas necesito saber de qué enfermedad \
                     hablas, o que me describas lo que sientes."
                .to_string(),
        };

        if urgency >= UrgencyLevel::High {
            body.push_str(
                "\n\nSeñales de alarma — busca atención médica si presentas:\
                 \n- dificultad respiratoria intensa\
                 \n- dolor en el pecho\
                 \n- fiebre alta que no cede\
                 \n- labios o uñas morados",
            );
        }
        body
    }

    pub fn treatment(disease: Option<&Disease>) -> String {
        match disease {
            Some(d) => {
                let mut body = d.treatment_text.clone();
                if d.transmissible {
                    body.push_str(&format!(
                        "\n\n{} puede contagiarse a otras personas: mientras tengas \
                         síntomas, evita el contacto cercano, usa mascarilla en \
                         espacios compartidos y ventílalos con frecuencia.",
                        d.display_name
                    ));
                }
                body
            }
            None => "El tratamiento depende de la enfermedad concreta. Dime qué \
                     enfermedad te interesa, o consulta con un profesional de salud \
                     para una pauta personalizada."
                .to_string(),
        }
    }

    pub fn prevention(disease: Option<&Disease>) -> String {
        match disease {
            Some(d) => d.prevention_text.clone(),
            None => "Las medidas generales de prevención respiratoria son: lavado \
                     frecuente de manos, ventilación de espacios cerrados, evitar el \
                     humo de tabaco y mantener las vacunas al día."
                .to_string(),
        }
    }

    pub fn action(urgency: UrgencyLevel) -> String {
        match urgency {
            UrgencyLevel::Critical => "Busca atención médica inmediata o llama a los \
                                       servicios de emergencia ahora mismo."
                .to_string(),
            UrgencyLevel::High => "Acude a un servicio de urgencias en las próximas \
                                   horas; no esperes a que los síntomas empeoren."
                .to_string(),
            UrgencyLevel::Medium => "Pide una cita médica prioritaria dentro de las \
                                     próximas 24 horas y vigila la evolución de tus \
                                     síntomas."
                .to_string(),
            UrgencyLevel::Low | UrgencyLevel::VeryLow => {
                "Observa la evolución de tus síntomas durante unos días; si empeoran \
                 o no mejoran, pide una cita médica."
                    .to_string()
            }
        }
    }

    pub fn general(
        disease: Option<&Disease>,
        symptoms: &[DetectedSymptom],
        kb: &KnowledgeBase,
    ) -> String {
        if let Some(d) = disease {
            return format!(
                "En tu consulta se menciona {}. {} Puedes preguntarme por sus \
                 síntomas, su tratamiento o cómo prevenirla.",
                d.display_name, d.description
            );
        }
        if !symptoms.is_empty() {
            let mut labels: Vec<&str> = Vec::new();
            for s in symptoms {
                let label = kb.category_label(&s.category_id).unwrap_or(&s.keyword);
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            return format!(
                "He identificado estos síntomas en tu consulta: {}. Puedo orientarte \
                 mejor si me dices desde cuándo los tienes y si han ido a más.",
                labels.join(", ")
            );
        }
        "No he identificado una enfermedad o un síntoma concreto en tu consulta. \
         Cuéntame con más detalle qué sientes o por qué enfermedad preguntas."
            .to_string()
    }
}

fn build_recommendations(disease: Option<&Disease>, urgency: UrgencyLevel) -> Vec<String> {
    let mut recommendations: Vec<String> = disease
        .map(|d| d.recommendations.clone())
        .unwrap_or_default();

    let generic = match urgency {
        UrgencyLevel::Critical => "Busca atención médica inmediata",
        UrgencyLevel::High => "Acude a un servicio de urgencias en las próximas horas",
        UrgencyLevel::Medium => "Programa una consulta médica en las próximas 24 horas",
        UrgencyLevel::Low | UrgencyLevel::VeryLow => {
            "Vigila tus síntomas y consulta si empeoran"
        }
    };
    recommendations.push(generic.to_string());
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::respiratory()
    }

    fn symptom(keyword: &str, category_id: &str) -> DetectedSymptom {
        DetectedSymptom {
            keyword: keyword.into(),
            category_id: category_id.into(),
        }
    }

    #[test]
    fn every_message_ends_with_disclaimer() {
        let kb = kb();
        let cases = [
            (QuestionType::Definition, vec!["asma".to_string()]),
            (QuestionType::Symptoms, vec!["neumonia".to_string()]),
            (QuestionType::Treatment, vec!["covid-19".to_string()]),
            (QuestionType::Prevention, vec![]),
            (QuestionType::Action, vec![]),
            (QuestionType::General, vec![]),
        ];
        for (qt, diseases) in cases {
            let (message, _) =
                compose(qt, &diseases, &[], UrgencyLevel::Medium, true, &kb);
            assert!(
                message.ends_with(DISCLAIMER),
                "{qt:?} answer missing disclaimer: {message}"
            );
        }
    }

    #[test]
    fn definition_uses_disease_description() {
        let kb = kb();
        let (message, _) = compose(
            QuestionType::Definition,
            &["asma".into()],
            &[],
            UrgencyLevel::Medium,
            true,
            &kb,
        );
        assert!(message.starts_with("Asma:"));
        assert!(message.contains("vías"));
    }

    #[test]
    fn symptoms_answer_lists_canonical_symptoms() {
        let kb = kb();
        let (message, _) = compose(
            QuestionType::Symptoms,
            &["asma".into()],
            &[],
            UrgencyLevel::Medium,
            true,
            &kb,
        );
        assert!(message.contains("- tos seca"));
        // Medium urgency: no alarm section.
        assert!(!message.contains("Señales de alarma"));
    }

    #[test]
    fn symptoms_answer_adds_alarm_section_on_high_urgency() {
        let kb = kb();
        let (message, _) = compose(
            QuestionType::Symptoms,
            &["neumonia".into()],
            &[],
            UrgencyLevel::High,
            true,
            &kb,
        );
        assert!(message.contains("Señales de alarma"));
        assert!(message.contains("dolor en el pecho"));
    }

    #[test]
    fn treatment_answer_adds_isolation_for_transmissible() {
        let kb = kb();
        let (message, _) = compose(
            QuestionType::Treatment,
            &["covid-19".into()],
            &[],
            UrgencyLevel::High,
            true,
            &kb,
        );
        assert!(message.contains("contagiarse"));
        assert!(message.contains("mascarilla"));

        let (message, _) = compose(
            QuestionType::Treatment,
            &["asma".into()],
            &[],
            UrgencyLevel::Medium,
            true,
            &kb,
        );
        assert!(!message.contains("contagiarse"));
    }

    #[test]
    fn action_answer_depends_only_on_urgency() {
        let critical = ResponseTemplates::action(UrgencyLevel::Critical);
        assert!(critical.contains("inmediata"));
        let high = ResponseTemplates::action(UrgencyLevel::High);
        assert!(high.contains("urgencias"));
        let medium = ResponseTemplates::action(UrgencyLevel::Medium);
        assert!(medium.contains("24 horas"));
        let low = ResponseTemplates::action(UrgencyLevel::Low);
        assert!(low.contains("Observa"));
        assert_eq!(low, ResponseTemplates::action(UrgencyLevel::VeryLow));
    }

    #[test]
    fn general_answer_summarizes_detected_symptoms() {
        let kb = kb();
        let symptoms = vec![
            symptom("tos", "tos"),
            symptom("dificultad para respirar", "dificultad_respiratoria"),
        ];
        let (message, _) = compose(
            QuestionType::General,
            &[],
            &symptoms,
            UrgencyLevel::High,
            true,
            &kb,
        );
        assert!(message.contains("tos"));
        assert!(message.contains("dificultad respiratoria"));
    }

    #[test]
    fn general_answer_prompts_for_detail_when_nothing_detected() {
        let kb = kb();
        let (message, _) = compose(
            QuestionType::General,
            &[],
            &[],
            UrgencyLevel::VeryLow,
            true,
            &kb,
        );
        assert!(message.contains("más detalle"));
    }

    #[test]
    fn recommendations_combine_disease_and_urgency_advice() {
        let kb = kb();
        let (_, recommendations) = compose(
            QuestionType::Definition,
            &["covid-19".into()],
            &[],
            UrgencyLevel::High,
            true,
            &kb,
        );
        assert!(recommendations
            .iter()
            .any(|r| r.contains("Aíslate")));
        assert!(recommendations
            .iter()
            .any(|r| r.contains("urgencias")));
    }

    #[test]
    fn recommendations_empty_when_not_requested() {
        let kb = kb();
        let (_, recommendations) = compose(
            QuestionType::Definition,
            &["covid-19".into()],
            &[],
            UrgencyLevel::High,
            false,
            &kb,
        );
        assert!(recommendations.is_empty());
    }
}
