use ferrous_relay_infrastructure::dns::{DnsServerHandler, QueryMetrics};
use socket2::{Domain, Protocol, Socket, Type};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{error, info, warn};

/// Classic DNS datagrams are at most 512 bytes; longer ones are cut here.
const RECV_BUFFER_SIZE: usize = 512;

/// Receives datagrams until `shutdown` resolves, handling each one on its own
/// task so that a slow upstream never stalls the loop.
pub async fn start_dns_server(
    bind_addr: String,
    handler: DnsServerHandler,
    metrics: Arc<QueryMetrics>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let socket_addr: SocketAddr = bind_addr.parse()?;
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(bind_address = %socket.local_addr()?, "DNS server listening on UDP");

    let handler = Arc::new(handler);
    let mut recv_buf = [0u8; RECV_BUFFER_SIZE];
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested, DNS server stopping");
                break;
            }
            result = socket.recv_from(&mut recv_buf) => {
                let (len, from) = match result {
                    Ok(received) => received,
                    Err(e) => {
                        warn!(error = %e, "UDP recv error");
                        continue;
                    }
                };
                metrics.record_datagram();

                let datagram: Arc<[u8]> = Arc::from(&recv_buf[..len]);
                let handler = handler.clone();
                let socket = socket.clone();
                let metrics = metrics.clone();
                tokio::spawn(async move {
                    let Some(response) = handler.handle_datagram(&datagram, from).await else {
                        return;
                    };
                    if let Err(e) = socket.send_to(&response, from).await {
                        metrics.record_send_failure();
                        error!(client = %from, error = %e, "Failed to send DNS response");
                    }
                });
            }
        }
    }

    Ok(())
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
