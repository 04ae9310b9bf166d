//! Local sentence embeddings with ONNX Runtime.
//!
//! Mean-pools the last hidden state over the attention mask, the pooling
//! sentence-transformers models such as all-MiniLM-L6-v2 are trained with.

use std::sync::Mutex;

use ort::session::Session;
use ort::value::Tensor;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::info;

use crate::assets::ModelAssets;
use crate::SemanticError;

pub(crate) struct OnnxEmbedder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl OnnxEmbedder {
    pub(crate) fn load(
        assets: &ModelAssets,
        max_sequence_length: usize,
    ) -> Result<Self, SemanticError> {
        let session = Session::builder()
            .and_then(|b| b.commit_from_file(&assets.model_path))
            .map_err(|e| SemanticError::Inference(format!("load model: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&assets.tokenizer_path)
            .map_err(|e| SemanticError::Inference(format!("load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_sequence_length,
                ..Default::default()
            }))
            .map_err(|e| SemanticError::Inference(format!("set truncation: {e}")))?;

        info!(model = %assets.model_path.display(), max_sequence_length, "loaded embedding model");
        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Embeds one text. Blocking; run it off the async executor.
    pub(crate) fn embed(&self, text: &str) -> Result<Vec<f32>, SemanticError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| SemanticError::Inference(format!("tokenize: {e}")))?;

        let seq_len = encoding.get_ids().len();
        if seq_len == 0 {
            return Err(SemanticError::Inference("tokenizer produced no tokens".into()));
        }
        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids().iter().map(|&t| t as i64).collect();

        let shape = [1i64, seq_len as i64];
        let ids_tensor = Tensor::from_array((shape, input_ids.into_boxed_slice()))
            .map_err(|e| SemanticError::Inference(e.to_string()))?;
        let mask_tensor = Tensor::from_array((shape, attention_mask.clone().into_boxed_slice()))
            .map_err(|e| SemanticError::Inference(e.to_string()))?;
        let type_tensor = Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
            .map_err(|e| SemanticError::Inference(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| SemanticError::Inference("model session poisoned".into()))?;
        let outputs = session
            .run(ort::inputs![
                "input_ids" => ids_tensor,
                "attention_mask" => mask_tensor,
                "token_type_ids" => type_tensor,
            ])
            .map_err(|e| SemanticError::Inference(format!("run: {e}")))?;

        // [1, seq_len, dim]
        let (output_shape, output_data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| SemanticError::Inference(format!("extract: {e}")))?;
        let dims: &[i64] = output_shape;
        if dims.len() != 3 || dims[0] != 1 {
            return Err(SemanticError::Inference(format!(
                "unexpected output shape: {dims:?}"
            )));
        }
        let out_len = dims[1] as usize;
        let dim = dims[2] as usize;

        let mut pooled = vec![0.0f32; dim];
        let mut token_count = 0.0f32;
        for (j, &mask) in attention_mask.iter().enumerate().take(out_len) {
            if mask > 0 {
                let offset = j * dim;
                for (d, p) in pooled.iter_mut().enumerate() {
                    *p += output_data[offset + d];
                }
                token_count += 1.0;
            }
        }
        if token_count > 0.0 {
            for p in &mut pooled {
                *p /= token_count;
            }
        }
        Ok(pooled)
    }
}
