#![allow(dead_code)]

use component_detector::{DetectorError, ImageInput, InferenceBackend};
use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array4;

pub const MODEL_JSON: &str = r#"{
    "format": "layers-model",
    "generatedBy": "keras v2.4.0",
    "convertedBy": "TensorFlow.js Converter v1.3.1",
    "modelTopology": {"class_name": "Sequential", "config": {"name": "sequential_1"}},
    "weightsManifest": [
        {
            "paths": ["weights.bin"],
            "weights": [
                {"name": "dense_Dense1/kernel", "shape": [1280, 100], "dtype": "float32"},
                {"name": "dense_Dense2/kernel", "shape": [100, 3], "dtype": "float32"}
            ]
        }
    ]
}"#;

pub const METADATA_JSON: &str = r#"{
    "tfjsVersion": "1.3.1",
    "tmVersion": "2.4.7",
    "packageVersion": "0.8.4-alpha2",
    "packageName": "@teachablemachine/image",
    "timeStamp": "2024-03-01T10:00:00.000Z",
    "userMetadata": {},
    "modelName": "tm-my-image-model",
    "labels": ["Resistor", "LED", "Capacitor"],
    "imageSize": 16
}"#;

/// Backend that ignores the image and returns fixed scores.
#[derive(Debug)]
pub struct FixedBackend(pub Vec<f32>);

impl InferenceBackend for FixedBackend {
    fn infer(&self, input: Array4<f32>) -> Result<Vec<f32>, DetectorError> {
        assert_eq!(input.shape(), &[1, 16, 16, 3]);
        Ok(self.0.clone())
    }
}

pub fn sample_image() -> ImageInput {
    ImageInput::from_image(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb([200, 120, 40]))),
        "sample.png",
    )
}
