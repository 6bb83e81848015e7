use chrono::{Duration as ChronoDuration, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::Client;
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;

const DURATION_SECS: u64 = 20;
const BASE_URL: &str = "http://localhost:3000";
const PASSWORD: &str = "benchmark-password";

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    body: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", BASE_URL);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .cookie_store(true)
        .build()
        .unwrap();

    if client.get(format!("{}/health", BASE_URL)).send().await.is_err() {
        eprintln!("{}", "❌ Server is NOT reachable at localhost:3000. Please start it first.".red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let email = register_guest(&client).await;
    let hotel_id = setup_hotel(&client).await;
    setup_bookings(&client, &hotel_id, &email, 10).await;

    println!("{}", "✅ Data created successfully.".green());
    println!("   Guest:    {}", email);
    println!("   Hotel ID: {}", hotel_id);

    let targets = vec![
        Target {
            name: "Health Check (Public)",
            method: "GET",
            url: format!("{}/health", BASE_URL),
            body: None,
        },
        Target {
            name: "Get Hotel Details (Public Read)",
            method: "GET",
            url: format!("{}/api/hotels/{}", BASE_URL, hotel_id),
            body: None,
        },
        Target {
            name: "My Bookings (Ledger Scan)",
            method: "GET",
            url: format!("{}/api/my-bookings", BASE_URL),
            body: None,
        },
        Target {
            name: "Login Flow (Crypto Intensive)",
            method: "POST",
            url: format!("{}/api/auth/login", BASE_URL),
            body: Some(json!({
                "email": email,
                "password": PASSWORD
            })),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

async fn register_guest(client: &Client) -> String {
    let email = format!("bench-{}@example.com", Uuid::new_v4());
    let res = client.post(format!("{}/api/users/register", BASE_URL))
        .json(&json!({
            "firstName": "Bench",
            "lastName": "Mark",
            "email": email,
            "password": PASSWORD
        }))
        .send()
        .await
        .expect("Failed to send register request");

    if !res.status().is_success() {
        panic!("Failed to register guest: status {}", res.status());
    }
    email
}

async fn setup_hotel(client: &Client) -> String {
    let res = client.post(format!("{}/api/my-hotels", BASE_URL))
        .json(&json!({
            "name": "Benchmark Grand",
            "city": "Berlin",
            "country": "Germany",
            "description": "Load testing",
            "type": "Business",
            "adultCount": 4,
            "childCount": 2,
            "facilities": ["Wifi", "Parking"],
            "pricePerNight": 120,
            "starRating": 4,
            "imageUrls": []
        }))
        .send()
        .await
        .expect("Failed to create hotel");

    if !res.status().is_success() {
        let status = res.status();
        let txt = res.text().await.unwrap_or_default();
        panic!("Failed to create hotel. Status: {}. Body: {}", status, txt);
    }

    let body: Value = res.json().await.expect("Failed to parse hotel response");
    body["id"].as_str().expect("No hotel id").to_string()
}

async fn setup_bookings(client: &Client, hotel_id: &str, email: &str, count: i64) {
    for i in 0..count {
        let check_in = (Utc::now() + ChronoDuration::days(30 + i * 3)).date_naive();
        let check_out = check_in + ChronoDuration::days(2);

        let res = client.post(format!("{}/api/hotels/{}/bookings", BASE_URL, hotel_id))
            .json(&json!({
                "firstName": "Bench",
                "lastName": "Mark",
                "email": email,
                "adultCount": 2,
                "childCount": 0,
                "checkIn": check_in.to_string(),
                "checkOut": check_out.to_string()
            }))
            .send()
            .await
            .expect("Failed to create booking");

        if !res.status().is_success() {
            panic!("Failed to create booking data. Status: {}", res.status());
        }
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match method {
                    "POST" => {
                        let mut req = client.post(&url);
                        if let Some(b) = body {
                            req = req.json(&b);
                        }
                        req.send().await
                    },
                    _ => client.get(&url).send().await,
                };
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
