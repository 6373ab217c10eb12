pub mod seaorm;

pub use seaorm::{
    SeaOrmEnterpriseRepository, SeaOrmEventRepository, SeaOrmGameRepository,
    SeaOrmStatisticRepository, SeaOrmUserRepository, SeaOrmVoucherRepository,
};
