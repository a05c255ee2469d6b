//! Movie search and fetch-by-ID commands.

use tokio::runtime::Runtime;

use crate::engine::Engine;
use crate::model::{MovieInfo, MovieSearchResult};

/// Search one provider, or all of them when no provider is given
pub fn cmd_search(
    rt: &Runtime,
    engine: &Engine,
    keyword: &str,
    provider: Option<&str>,
    lazy: bool,
    json: bool,
) -> anyhow::Result<()> {
    let outcome = rt.block_on(async {
        match provider {
            Some(name) => engine.search_movie(keyword, name, lazy).await,
            None => engine.search_movie_all(keyword, lazy).await,
        }
    });

    let results = match outcome {
        Ok(results) => results,
        Err(e) if e.is_not_found() => {
            println!("No matches for {:?}", keyword);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    println!("Found {} result(s) for {:?}", results.len(), keyword);
    println!();
    for (i, result) in results.iter().enumerate() {
        print_search_result(i + 1, result);
    }
    Ok(())
}

/// Fetch and print full movie info
pub fn cmd_info(
    rt: &Runtime,
    engine: &Engine,
    id: &str,
    provider: &str,
    lazy: bool,
    json: bool,
) -> anyhow::Result<()> {
    let info = match rt.block_on(engine.get_movie_info_by_id(id, provider, lazy)) {
        Ok(info) => info,
        Err(e) if e.is_not_found() => {
            println!("No movie {:?} on {}", id, provider);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print_movie_info(&info);
    }
    Ok(())
}

fn print_search_result(rank: usize, result: &MovieSearchResult) {
    println!(
        "{:>3}. [{}] {}  {}",
        rank, result.provider, result.number, result.title
    );
    println!("     id: {}", result.id);
    if !result.release_date.is_empty() {
        println!("     released: {}", result.release_date);
    }
}

fn print_movie_info(info: &MovieInfo) {
    println!("{}  {}", info.number, info.title);
    println!("  Provider: {} (id: {})", info.provider, info.id);
    if !info.homepage.is_empty() {
        println!("  Homepage: {}", info.homepage);
    }
    if !info.release_date.is_empty() {
        println!("  Released: {}", info.release_date);
    }
    if info.runtime > 0 {
        println!("  Runtime:  {} min", info.runtime);
    }
    if !info.director.is_empty() {
        println!("  Director: {}", info.director);
    }
    if !info.actors.is_empty() {
        println!("  Actors:   {}", info.actors.join(", "));
    }
    if !info.maker.is_empty() {
        println!("  Maker:    {}", info.maker);
    }
    if !info.series.is_empty() {
        println!("  Series:   {}", info.series);
    }
    if !info.genres.is_empty() {
        println!("  Genres:   {}", info.genres.join(", "));
    }
    if info.score > 0.0 {
        println!("  Score:    {:.1}", info.score);
    }
    if !info.summary.is_empty() {
        println!();
        println!("{}", info.summary);
    }
}
