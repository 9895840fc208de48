use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use canonical::TokenizedText;
use markup::build;
use matcher::{label, match_tokens_interruptible, Interrupt, Side};
use rayon::prelude::*;
use tracing::{debug, error, warn, Level};

use crate::batch::{BatchPair, TextInput};
use crate::error::AlignError;
use crate::metrics::{AlignMetrics, MetricsSpan};
use crate::options::AlignOptions;
use crate::result::AlignmentResult;

/// Aligns text pairs under a fixed set of options.
///
/// Cloning is cheap; clones share options and the metrics recorder.
#[derive(Clone)]
pub struct Aligner {
    options: Arc<AlignOptions>,
    metrics: Option<Arc<dyn AlignMetrics>>,
}

impl fmt::Debug for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("options", &self.options)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self {
            options: Arc::new(AlignOptions::default()),
            metrics: None,
        }
    }
}

impl Aligner {
    pub fn new(options: AlignOptions) -> Result<Self, AlignError> {
        options.validate()?;
        Ok(Self {
            options: Arc::new(options),
            metrics: None,
        })
    }

    /// Report every computed pair to `recorder`.
    pub fn with_metrics(mut self, recorder: Arc<dyn AlignMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Tokenize a text with this aligner's tokenizer settings.
    ///
    /// The result can be wrapped in an `Arc` and reused across many pairs
    /// through [`TextInput::Tokenized`].
    pub fn tokenize(&self, text: impl Into<String>) -> Result<TokenizedText, AlignError> {
        let text = text.into();
        self.options.check_input_len("text", text.len())?;
        Ok(TokenizedText::new(text, &self.options.tokenizer))
    }

    /// Align one pair. Errors surface directly.
    pub fn align(&self, a: &str, b: &str) -> Result<AlignmentResult, AlignError> {
        self.options.check_input_len("input a", a.len())?;
        self.options.check_input_len("input b", b.len())?;
        let a = TokenizedText::new(a, &self.options.tokenizer);
        let b = TokenizedText::new(b, &self.options.tokenizer);
        self.compute(None, &a, &b, &())
    }

    /// Align two byte buffers that are expected to hold UTF-8 text.
    pub fn align_bytes(&self, a: &[u8], b: &[u8]) -> Result<AlignmentResult, AlignError> {
        let a = decode_utf8("input a", a)?;
        let b = decode_utf8("input b", b)?;
        self.align(a, b)
    }

    /// Align two texts that were tokenized ahead of time.
    pub fn align_tokenized(
        &self,
        a: &TokenizedText,
        b: &TokenizedText,
    ) -> Result<AlignmentResult, AlignError> {
        self.check_tokenized("input a", a)?;
        self.check_tokenized("input b", b)?;
        self.compute(None, a, b, &())
    }

    /// Align every pair in parallel. Slot `i` of the output belongs to
    /// `pairs[i]`; a failing pair never affects its neighbours.
    pub fn align_all(&self, pairs: &[BatchPair]) -> Vec<Result<AlignmentResult, AlignError>> {
        pairs
            .par_iter()
            .enumerate()
            .map(|(index, pair)| self.run_pair(Some(index), &pair.a, &pair.b, &()))
            .collect()
    }

    /// Align one fixed document (side A) against many candidates (side B).
    ///
    /// The document is tokenized once. An unusable document fails the whole
    /// call; candidate failures stay in their own slots.
    pub fn align_one_to_many<S>(
        &self,
        document: &str,
        candidates: &[S],
    ) -> Result<Vec<Result<AlignmentResult, AlignError>>, AlignError>
    where
        S: AsRef<str> + Sync,
    {
        let document = self.tokenize(document)?;
        Ok(candidates
            .par_iter()
            .enumerate()
            .map(|(index, candidate)| {
                let candidate = candidate.as_ref();
                self.options.check_input_len("candidate", candidate.len())?;
                let candidate = TokenizedText::new(candidate, &self.options.tokenizer);
                self.compute(Some(index), &document, &candidate, &())
            })
            .collect())
    }

    /// Resolve both inputs of a pair and align them.
    pub(crate) fn run_pair<I>(
        &self,
        index: Option<usize>,
        a: &TextInput,
        b: &TextInput,
        interrupt: &I,
    ) -> Result<AlignmentResult, AlignError>
    where
        I: Interrupt + ?Sized,
    {
        let a = self.resolve("input a", a)?;
        let b = self.resolve("input b", b)?;
        self.compute(index, &a, &b, interrupt)
    }

    fn resolve<'a>(
        &self,
        label: &str,
        input: &'a TextInput,
    ) -> Result<Cow<'a, TokenizedText>, AlignError> {
        match input {
            TextInput::Raw(text) => {
                self.options.check_input_len(label, text.len())?;
                Ok(Cow::Owned(TokenizedText::new(
                    text.as_str(),
                    &self.options.tokenizer,
                )))
            }
            TextInput::Tokenized(doc) => {
                self.check_tokenized(label, doc)?;
                Ok(Cow::Borrowed(doc.as_ref()))
            }
        }
    }

    fn check_tokenized(&self, label: &str, doc: &TokenizedText) -> Result<(), AlignError> {
        self.options.check_input_len(label, doc.text().len())?;
        if doc.config_version() != self.options.tokenizer.version {
            return Err(AlignError::InvalidInput(format!(
                "{label} was tokenized with config version {}, aligner uses {}",
                doc.config_version(),
                self.options.tokenizer.version
            )));
        }
        Ok(())
    }

    fn compute<I>(
        &self,
        index: Option<usize>,
        a: &TokenizedText,
        b: &TokenizedText,
        interrupt: &I,
    ) -> Result<AlignmentResult, AlignError>
    where
        I: Interrupt + ?Sized,
    {
        let start = Instant::now();
        let metrics = MetricsSpan::start(self.metrics.as_ref());
        let span = tracing::span!(
            Level::DEBUG,
            "overlap.align",
            index = ?index,
            tokens_a = a.tokens().len(),
            tokens_b = b.tokens().len()
        );
        let _guard = span.enter();

        let result = align_documents(&self.options, a, b, interrupt);
        let elapsed_micros = start.elapsed().as_micros();
        match &result {
            Ok(res) => debug!(pairs = res.pairs.len(), elapsed_micros, "align_success"),
            Err(err) if err.is_defect() => error!(error = %err, elapsed_micros, "align_defect"),
            Err(AlignError::Interrupted) => debug!(elapsed_micros, "align_interrupted"),
            Err(err) => warn!(error = %err, elapsed_micros, "align_failure"),
        }

        if let Some(span) = metrics {
            span.record(result.as_ref().map(|_| ()).map_err(|err| err.clone()));
        }
        result
    }
}

fn align_documents<I>(
    options: &AlignOptions,
    a: &TokenizedText,
    b: &TokenizedText,
    interrupt: &I,
) -> Result<AlignmentResult, AlignError>
where
    I: Interrupt + ?Sized,
{
    let raw = match_tokens_interruptible(a.tokens(), b.tokens(), interrupt)?;
    let pairs = label(&raw, a.tokens(), b.tokens(), &options.label_config())?;
    let markup_a = build(a.tokens(), a.text(), &pairs, Side::A)?;
    let markup_b = build(b.tokens(), b.text(), &pairs, Side::B)?;
    Ok(AlignmentResult {
        pairs,
        markup_a,
        markup_b,
    })
}

fn decode_utf8<'a>(label: &str, bytes: &'a [u8]) -> Result<&'a str, AlignError> {
    std::str::from_utf8(bytes).map_err(|err| {
        AlignError::InvalidInput(format!("{label} is not valid UTF-8: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;
    use std::time::Duration;

    #[test]
    fn align_reports_cat_scenario() {
        let res = Aligner::default()
            .align("The cat sat on the mat.", "The cat sat on the rug.")
            .expect("align");
        assert_eq!(res.pairs.len(), 1);
        assert_eq!(res.pairs[0].length, 5);
    }

    #[test]
    fn invalid_utf8_is_invalid_input() {
        let err = Aligner::default()
            .align_bytes(b"valid", &[0xff, 0xfe])
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(msg) if msg.contains("input b")));
    }

    #[test]
    fn oversized_input_is_invalid_input() {
        let aligner = Aligner::new(AlignOptions::default().with_max_input_bytes(8)).expect("opts");
        assert!(aligner.align("short", "short too").is_err());
        assert!(aligner.align("short", "short").is_ok());
    }

    #[test]
    fn new_rejects_invalid_options() {
        let err = Aligner::new(AlignOptions::default().with_min_match_tokens(0)).unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(_)));
    }

    #[test]
    fn tokenized_input_with_other_version_is_rejected() {
        let aligner = Aligner::default();
        let foreign = TokenizedText::new(
            "text",
            &canonical::TokenizeConfig {
                version: 2,
                ..Default::default()
            },
        );
        let local = aligner.tokenize("text").expect("tokenize");
        let err = aligner.align_tokenized(&foreign, &local).unwrap_err();
        assert!(matches!(err, AlignError::InvalidInput(msg) if msg.contains("version 2")));
    }

    #[test]
    fn interrupted_pair_surfaces_interrupted() {
        let aligner = Aligner::default();
        let stop = AtomicBool::new(true);
        let err = aligner
            .run_pair(None, &"a b c".into(), &"a b c".into(), &stop)
            .unwrap_err();
        assert_eq!(err, AlignError::Interrupted);
    }

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<bool>>,
    }

    impl AlignMetrics for Recorder {
        fn record_alignment(&self, _latency: Duration, result: Result<(), AlignError>) {
            self.events.lock().unwrap().push(result.is_ok());
        }
    }

    #[test]
    fn metrics_see_each_computed_pair() {
        let recorder = Arc::new(Recorder::default());
        let aligner = Aligner::default().with_metrics(recorder.clone());
        aligner.align("one two", "two one").expect("align");
        let stop = AtomicBool::new(true);
        let _ = aligner.run_pair(None, &"x".into(), &"x".into(), &stop);
        assert_eq!(*recorder.events.lock().unwrap(), vec![true, false]);
    }
}
