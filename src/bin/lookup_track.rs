//! Look up genre/style tags for a single track from the command line.
//!
//! Usage: lookup_track <artist> <track> [album]
//!
//! Requires DISCOGS_USER_TOKEN in the environment (or a .env file).

use std::process;

use tagscout::{
    AllMusicScraper, Config, DiscogsClient, MusicBrainzClient, Resolver, TrackDescriptor,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <artist> <track> [album]", args[0]);
        process::exit(1);
    }

    let descriptor = TrackDescriptor {
        artist: args[1].clone(),
        track: args[2].clone(),
        album: args.get(3).cloned(),
    };

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut resolver = Resolver::new(
        DiscogsClient::new(&config),
        MusicBrainzClient::new(&config),
        AllMusicScraper::new(),
        &config,
    );

    println!("Looking up: {} — {}", descriptor.artist, descriptor.track);
    if let Some(ref album) = descriptor.album {
        println!("Album: {}", album);
    }
    println!();

    match resolver.resolve(&descriptor) {
        Ok(result) if result.matched => {
            if let Some(strategy) = result.strategy {
                println!("Matched via {:?}", strategy);
            }
            println!("Genres: {}", join_or_dash(&result.genres));
            println!("Styles: {}", join_or_dash(&result.styles));
        }
        Ok(_) => {
            println!("No match found in any catalog");
        }
        Err(e) => {
            eprintln!("Lookup failed: {}", e);
            process::exit(1);
        }
    }
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
