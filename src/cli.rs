use cat_discovery_common::ExclusionRule;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cat-discovery")]
#[command(about = "ランダムな猫画像をバンリスト付きで探す", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 猫を1匹探して表示
    Discover {
        /// バンルール (kind=value、複数指定可)
        #[arg(short, long = "ban", value_name = "KIND=VALUE")]
        bans: Vec<ExclusionRule>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話的に猫を探しながらバンリストを編集
    Session {
        /// 初期バンルール (kind=value、複数指定可)
        #[arg(short, long = "ban", value_name = "KIND=VALUE")]
        bans: Vec<ExclusionRule>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// APIのベースURLを設定
        #[arg(long)]
        set_base_url: Option<String>,

        /// 最大試行回数を設定
        #[arg(long)]
        set_max_attempts: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
