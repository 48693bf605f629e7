use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use clap::Parser;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use loremipsum_core::io::{list_files, model_name, resolve_folder};
use loremipsum_core::model::generation_input::{ParagraphInput, SentenceInput};
use loremipsum_core::model::sample::LOREM_IPSUM;
use loremipsum_core::model::variate::make_rng;
use loremipsum_core::{Generator, Sample};

/// Largest `amount` a single request may ask for.
const MAX_AMOUNT: usize = 1000;

/// Largest sentence length (words) or paragraph length (sentences) a
/// request may ask for, directly or through a mean or sigma override.
const MAX_REQUEST_LENGTH: usize = 200;

/// Extension of stored models in the data directory.
const MODEL_EXTENSION: &str = "bin";

/// Server configuration, from flags or environment.
#[derive(Parser, Debug)]
#[command(name = "loremipsum-server", version, about = "Serve placeholder text over HTTP")]
struct ServerConfig {
	#[arg(long, env = "LOREMIPSUM_HOST", default_value = "127.0.0.1")]
	host: String,

	#[arg(long, env = "LOREMIPSUM_PORT", default_value_t = 5000)]
	port: u16,

	/// Directory holding `<name>.bin` models
	#[arg(long, env = "LOREMIPSUM_DATA", default_value = "./data")]
	data_dir: String,

	/// Worker threads (defaults to the number of CPUs)
	#[arg(long)]
	workers: Option<usize>,
}

/// Query parameters of the generation endpoints.
///
/// Each endpoint reads the fields that apply to it and ignores the others.
#[derive(Deserialize)]
struct GenerateParams {
	model: Option<String>,
	amount: Option<usize>,
	seed: Option<u64>,
	length: Option<usize>,
	sentence_len: Option<usize>,
	sentence_mean: Option<f64>,
	sentence_sigma: Option<f64>,
	incipit: Option<bool>,
	paragraph_len: Option<usize>,
	paragraph_mean: Option<f64>,
	paragraph_sigma: Option<f64>,
}

#[derive(Deserialize)]
struct ModelQuery {
	names: Option<String>,
}

#[derive(Serialize)]
struct SentenceResponse {
	words: usize,
	text: String,
}

#[derive(Serialize)]
struct ParagraphResponse {
	sentences: usize,
	words: usize,
	text: String,
}

/// Loaded samples, by name. The bundled sample is always present.
struct SharedData {
	data_dir: PathBuf,
	samples: HashMap<String, Arc<Sample>>,
}

impl GenerateParams {
	/// Checks the amount and resolves the requested model.
	fn generator(&self, data: &RwLock<SharedData>) -> Result<(Generator, usize), HttpResponse> {
		let amount = self.amount.unwrap_or(1);
		if amount > MAX_AMOUNT {
			warn!("Rejected amount {amount}");
			return Err(HttpResponse::BadRequest().body(format!("Amount must be at most {MAX_AMOUNT}")));
		}
		if let Err(message) = self.check_lengths() {
			warn!("Rejected parameters: {message}");
			return Err(HttpResponse::BadRequest().body(message));
		}

		let name = self.model.as_deref().unwrap_or(LOREM_IPSUM);
		let shared_data = data
			.read()
			.map_err(|_| HttpResponse::InternalServerError().body("Model lock failed"))?;
		match shared_data.samples.get(name) {
			Some(sample) => Ok((Generator::new(Arc::clone(sample)), amount)),
			None => {
				warn!("Requested unknown model '{name}'");
				Err(HttpResponse::NotFound().body(format!("Model '{name}' is not loaded")))
			}
		}
	}

	/// Rejects lengths, means and sigmas outside `0..=MAX_REQUEST_LENGTH`.
	///
	/// Means may be negative since only the magnitude of a draw counts.
	fn check_lengths(&self) -> Result<(), String> {
		let limit = MAX_REQUEST_LENGTH as f64;
		let lengths = [("length", self.length), ("sentence_len", self.sentence_len), ("paragraph_len", self.paragraph_len)];
		for (name, value) in lengths {
			if value.is_some_and(|v| v > MAX_REQUEST_LENGTH) {
				return Err(format!("{name} must be at most {MAX_REQUEST_LENGTH}"));
			}
		}

		let means = [("sentence_mean", self.sentence_mean), ("paragraph_mean", self.paragraph_mean)];
		for (name, value) in means {
			if value.is_some_and(|v| !(-limit..=limit).contains(&v)) {
				return Err(format!("{name} must lie within ±{MAX_REQUEST_LENGTH}"));
			}
		}

		let sigmas = [("sentence_sigma", self.sentence_sigma), ("paragraph_sigma", self.paragraph_sigma)];
		for (name, value) in sigmas {
			if value.is_some_and(|v| !(0.0..=limit).contains(&v)) {
				return Err(format!("{name} must lie within 0..={MAX_REQUEST_LENGTH}"));
			}
		}
		Ok(())
	}

	fn sentence_input(&self) -> SentenceInput {
		SentenceInput {
			sentence_len: self.sentence_len,
			sentence_mean: self.sentence_mean,
			sentence_sigma: self.sentence_sigma,
			incipit: self.incipit.unwrap_or(false),
		}
	}

	fn paragraph_input(&self) -> ParagraphInput {
		ParagraphInput {
			paragraph_len: self.paragraph_len,
			paragraph_mean: self.paragraph_mean,
			paragraph_sigma: self.paragraph_sigma,
			sentence: self.sentence_input(),
		}
	}
}

/// HTTP GET endpoint `/v1/words`
///
/// Returns a JSON list; `null` marks a length missing from the lexicon.
#[get("/v1/words")]
async fn get_words(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let (generator, amount) = match query.generator(&data) {
		Ok(g) => g,
		Err(response) => return response,
	};
	let mut rng = make_rng(query.seed);
	let words: Vec<Option<String>> = generator
		.generate_words(amount, query.length, &mut rng)
		.map(|word| word.map(str::to_owned))
		.collect();
	HttpResponse::Ok().json(words)
}

/// HTTP GET endpoint `/v1/sentences`
#[get("/v1/sentences")]
async fn get_sentences(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let (generator, amount) = match query.generator(&data) {
		Ok(g) => g,
		Err(response) => return response,
	};
	let mut rng = make_rng(query.seed);
	let sentences: Vec<SentenceResponse> = generator
		.generate_sentences(amount, query.sentence_input(), &mut rng)
		.map(|(words, text)| SentenceResponse { words, text })
		.collect();
	HttpResponse::Ok().json(sentences)
}

/// HTTP GET endpoint `/v1/paragraphs`
#[get("/v1/paragraphs")]
async fn get_paragraphs(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let (generator, amount) = match query.generator(&data) {
		Ok(g) => g,
		Err(response) => return response,
	};
	let mut rng = make_rng(query.seed);
	let paragraphs: Vec<ParagraphResponse> = generator
		.generate_paragraphs(amount, query.paragraph_input(), &mut rng)
		.map(|(sentences, words, text)| ParagraphResponse { sentences, words, text })
		.collect();
	HttpResponse::Ok().json(paragraphs)
}

/// HTTP GET endpoint `/v1/models`: models stored in the data directory.
#[get("/v1/models")]
async fn get_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let data_dir = match data.read() {
		Ok(shared_data) => shared_data.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&data_dir, MODEL_EXTENSION) {
		Ok(files) => {
			let names: Vec<String> = files.iter().filter_map(model_name).collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models"),
	}
}

/// HTTP GET endpoint `/v1/loaded_models`
#[get("/v1/loaded_models")]
async fn get_loaded_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let mut names: Vec<&str> = shared_data.samples.keys().map(String::as_str).collect();
	names.sort_unstable();
	HttpResponse::Ok().body(names.join("\n"))
}

/// HTTP PUT endpoint `/v1/load_models?names=a,b`
///
/// Replaces the loaded models with the named ones. Nothing changes when
/// any of them fails to load.
#[put("/v1/load_models")]
async fn put_models(data: web::Data<RwLock<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};

	let (data_dir, lorem) = match data.read() {
		Ok(shared_data) => (shared_data.data_dir.clone(), shared_data.samples.get(LOREM_IPSUM).cloned()),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	// The bundled sample always stays loaded
	let mut samples = HashMap::new();
	if let Some(lorem) = lorem {
		samples.insert(LOREM_IPSUM.to_owned(), lorem);
	}

	for name in query_names.split(',').map(str::trim).filter(|s| !s.is_empty()) {
		if name.contains(['/', '\\']) || name.starts_with('.') {
			warn!("Rejected model name '{name}'");
			return HttpResponse::BadRequest().body(format!("Invalid model name '{name}'"));
		}
		let path = data_dir.join(format!("{name}.{MODEL_EXTENSION}"));
		match Sample::load(&format!("file://{}", path.display())) {
			Ok(sample) => {
				info!("Loaded model '{name}'");
				samples.insert(name.to_owned(), Arc::new(sample));
			}
			Err(e) => {
				warn!("Failed to load model '{name}': {e}");
				return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}"));
			}
		}
	}

	match data.write() {
		Ok(mut shared_data) => shared_data.samples = samples,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	}
	HttpResponse::Ok().body("Models loaded successfully")
}

/// Main entry point for the server.
///
/// Loads the bundled sample, wraps the model table in a `RwLock` and starts
/// an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let config = ServerConfig::parse();

	let mut samples = HashMap::new();
	samples.insert(LOREM_IPSUM.to_owned(), Arc::new(Sample::lorem_ipsum()?));
	let shared_data = SharedData { data_dir: resolve_folder(&config.data_dir), samples };
	let shared_model = web::Data::new(RwLock::new(shared_data));

	let workers = config.workers.unwrap_or_else(num_cpus::get);
	info!("Listening on {}:{} with {workers} workers", config.host, config.port);

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_words)
			.service(get_sentences)
			.service(get_paragraphs)
			.service(get_models)
			.service(get_loaded_models)
			.service(put_models)
	})
		.workers(workers)
		.bind((config.host.as_str(), config.port))?
		.run()
		.await?;

	Ok(())
}
