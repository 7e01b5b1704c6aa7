//! Compiled-in dictionaries.
//!
//! English is complete. Every other language only carries the strings shown
//! on the progress screen; the rest is fetched on first use.

use super::{
    Dictionary,
    TranslationCache,
    TranslationKey as K,
};
use crate::language::LanguageCode;

const EN: &[(K, &str)] = &[
    (K::Welcome, "Welcome to the App!"),
    (K::NextStep, "Next Step"),
    (K::ChristmasTheme, "🎄 Christmas Theme"),
    (K::DarkTheme, "🌙 Dark Theme"),
    (K::PinkyTheme, "💗 Pinky Theme"),
    (K::LightTheme, "☀️ Light Theme"),
    (K::HalloweenTheme, "🎃 Halloween Theme"),
    (K::English, "🇺🇸 English"),
    (K::Vietnamese, "🇻🇳 Vietnamese"),
    (K::Spanish, "🇪🇸 Spanish"),
    (K::French, "🇫🇷 French"),
    (K::German, "🇩🇪 German"),
    (K::Japanese, "🇯🇵 Japanese"),
    (K::Korean, "🇰🇷 Korean"),
    (K::Chinese, "🇨🇳 Chinese"),
    (K::Language, "Language"),
    (K::Theme, "Theme"),
    (K::Settings, "Settings"),
    (K::Loading, "Loading..."),
    (K::Translating, "Translating..."),
    (K::Error, "Translation failed"),
    (K::RemoveCache, "Remove Cache"),
    (K::CacheRemoved, "✓ Cache Cleared!"),
    (K::RemoveCacheConfirm, "This will clear all translation cache. Continue?"),
    (K::Connecting, "Connecting..."),
    (K::CurrentStep, "Current step"),
    (K::SendingTranslationRequest, "Sending translation request..."),
    (K::ProcessingTranslation, "Processing translation..."),
    (K::ReceivingTranslationData, "Receiving translation data..."),
    (K::ParsingTranslationResults, "Parsing translation results..."),
    (K::NoTranslationReceived, "No translation received"),
    (K::InvalidJsonResponse, "Invalid JSON response"),
    (K::TranslationFailed, "Translation failed"),
    (K::TranslatingTo, "Translating to"),
    (K::TranslationComplete, "✓ Translation complete!"),
    (K::ReturningToHome, "Returning to home..."),
    (K::PreparingTranslation, "Please wait while we prepare your translation..."),
];

const VI: &[(K, &str)] = &[
    (K::Connecting, "Kết nối..."),
    (K::CurrentStep, "Bước hiện tại"),
    (K::SendingTranslationRequest, "Gửi yêu cầu dịch..."),
    (K::ProcessingTranslation, "Xử lý dịch..."),
    (K::ReceivingTranslationData, "Nhận dữ liệu dịch..."),
    (K::ParsingTranslationResults, "Phân tích kết quả dịch..."),
    (K::NoTranslationReceived, "Không nhận được kết quả dịch"),
    (K::InvalidJsonResponse, "Kết quả dịch không hợp lệ"),
    (K::TranslationFailed, "Dịch thất bại"),
    (K::TranslatingTo, "Dịch sang"),
    (K::TranslationComplete, "✓ Dịch xong!"),
    (K::ReturningToHome, "Quay về trang chủ..."),
    (K::PreparingTranslation, "Vui lòng chờ trong khi chúng tôi chuẩn bị dịch..."),
];

const ES: &[(K, &str)] = &[
    (K::Connecting, "Conectando..."),
    (K::CurrentStep, "Paso actual"),
    (K::SendingTranslationRequest, "Enviando solicitud de traducción..."),
    (K::ProcessingTranslation, "Procesando traducción..."),
    (K::ReceivingTranslationData, "Recibiendo datos de traducción..."),
    (K::ParsingTranslationResults, "Analizando resultados de traducción..."),
    (K::NoTranslationReceived, "No se recibió traducción"),
    (K::InvalidJsonResponse, "Respuesta JSON inválida"),
    (K::TranslationFailed, "Traducción fallida"),
    (K::TranslatingTo, "Traduciendo a"),
    (K::TranslationComplete, "✓ Traducción completa!"),
    (K::ReturningToHome, "Volviendo a la página principal..."),
    (K::PreparingTranslation, "Por favor, espere mientras preparamos su traducción..."),
];

const FR: &[(K, &str)] = &[
    (K::Connecting, "Connexion..."),
    (K::CurrentStep, "Étape actuelle"),
    (K::SendingTranslationRequest, "Envoi de la demande de traduction..."),
    (K::ProcessingTranslation, "Traitement de la traduction..."),
    (K::ReceivingTranslationData, "Réception des données de traduction..."),
    (K::ParsingTranslationResults, "Analyse des résultats de traduction..."),
    (K::NoTranslationReceived, "Aucune traduction reçue"),
    (K::InvalidJsonResponse, "Réponse JSON invalide"),
    (K::TranslationFailed, "Traduction échouée"),
    (K::TranslatingTo, "Traduisant vers"),
    (K::TranslationComplete, "✓ Traductions terminées!"),
    (K::ReturningToHome, "Retour à la page d'accueil..."),
    (K::PreparingTranslation, "Veuillez patienter pendant que nous préparons votre traduction..."),
];

const DE: &[(K, &str)] = &[
    (K::Connecting, "Verbinden..."),
    (K::CurrentStep, "Aktueller Schritt"),
    (K::SendingTranslationRequest, "Übersetzungsanfrage senden..."),
    (K::ProcessingTranslation, "Übersetzung verarbeiten..."),
    (K::ReceivingTranslationData, "Übersetzungsdaten empfangen..."),
    (K::ParsingTranslationResults, "Übersetzungsergebnisse analysieren..."),
    (K::NoTranslationReceived, "Keine Übersetzung empfangen"),
    (K::InvalidJsonResponse, "Ungültige JSON-Antwort"),
    (K::TranslationFailed, "Übersetzung fehlgeschlagen"),
    (K::TranslatingTo, "Übersetzt in"),
    (K::TranslationComplete, "✓ Übersetzung abgeschlossen!"),
    (K::ReturningToHome, "Zurück zur Startseite..."),
    (K::PreparingTranslation, "Bitte warten Sie, während wir Ihre Übersetzung vorbereiten..."),
];

const JA: &[(K, &str)] = &[
    (K::Connecting, "接続中..."),
    (K::CurrentStep, "現在のステップ"),
    (K::SendingTranslationRequest, "翻訳リクエストを送信..."),
    (K::ProcessingTranslation, "翻訳処理中..."),
    (K::ReceivingTranslationData, "翻訳データを受信..."),
    (K::ParsingTranslationResults, "翻訳結果を解析..."),
    (K::NoTranslationReceived, "翻訳結果が受信されませんでした"),
    (K::InvalidJsonResponse, "無効なJSON応答"),
    (K::TranslationFailed, "翻訳に失敗しました"),
    (K::TranslatingTo, "翻訳先"),
    (K::TranslationComplete, "✓ 翻訳が完了しました!"),
    (K::ReturningToHome, "ホームに戻ります..."),
    (K::PreparingTranslation, "翻訳を準備しています..."),
];

const KO: &[(K, &str)] = &[
    (K::Connecting, "연결 중..."),
    (K::CurrentStep, "현재 단계"),
    (K::SendingTranslationRequest, "번역 요청 전송..."),
    (K::ProcessingTranslation, "번역 처리 중..."),
    (K::ReceivingTranslationData, "번역 데이터 수신..."),
    (K::ParsingTranslationResults, "번역 결과 분석..."),
    (K::NoTranslationReceived, "번역 결과가 수신되지 않았습니다"),
    (K::InvalidJsonResponse, "유효하지 않은 JSON 응답"),
    (K::TranslationFailed, "번역 실패"),
    (K::TranslatingTo, "번역 대상"),
    (K::TranslationComplete, "✓ 번역이 완료되었습니다!"),
    (K::ReturningToHome, "홈으로 돌아갑니다..."),
    (K::PreparingTranslation, "번역을 준비하고 있습니다..."),
];

const ZH: &[(K, &str)] = &[
    (K::Connecting, "连接中..."),
    (K::CurrentStep, "当前步骤"),
    (K::SendingTranslationRequest, "发送翻译请求..."),
    (K::ProcessingTranslation, "处理翻译..."),
    (K::ReceivingTranslationData, "接收翻译数据..."),
    (K::ParsingTranslationResults, "解析翻译结果..."),
    (K::NoTranslationReceived, "未收到翻译结果"),
    (K::InvalidJsonResponse, "无效的JSON响应"),
    (K::TranslationFailed, "翻译失败"),
    (K::TranslatingTo, "翻译成"),
    (K::TranslationComplete, "翻译完成!"),
    (K::ReturningToHome, "返回主页..."),
    (K::PreparingTranslation, "正在准备翻译..."),
];

/// Built-in dictionary for `code`.
#[must_use]
pub fn default_dictionary(code: LanguageCode) -> Dictionary {
    let entries = match code {
        LanguageCode::En => EN,
        LanguageCode::Vi => VI,
        LanguageCode::Es => ES,
        LanguageCode::Fr => FR,
        LanguageCode::De => DE,
        LanguageCode::Ja => JA,
        LanguageCode::Ko => KO,
        LanguageCode::Zh => ZH,
    };
    entries.iter().map(|(key, text)| (*key, (*text).to_string())).collect()
}

/// Built-in dictionaries for every language.
#[must_use]
pub fn default_cache() -> TranslationCache {
    LanguageCode::ALL.into_iter().map(|code| (code, default_dictionary(code))).collect()
}
