/*!
 * Synthesized rephrasing for the no-native-rephrase provider.
 *
 * DeepL only translates between language pairs, so a paraphrase has to be
 * manufactured from translation round trips:
 * - `two_hop`: forward translate then back translate, used by the
 *   combined translate-and-rephrase action
 * - `fanout`: five concurrent double translations through distinct
 *   intermediate languages, used by the standalone rephrase action
 */

pub mod fanout;
pub mod two_hop;

pub use fanout::{
    fanout_rephrase, FanoutResult, DEFAULT_WORKER_TIMEOUT, INTERMEDIATE_CODES, NO_ALTERNATIVES,
};
pub use two_hop::{
    two_hop_translate_rephrase, TwoHopOutcome, REPHRASE_EMPTY, REPHRASE_SKIPPED, TRANSLATION_EMPTY,
};
